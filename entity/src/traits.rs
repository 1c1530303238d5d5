use sea_orm::{DatabaseConnection, DbErr};

/// Trait for entities that can be loaded from the ID on a request path
///
/// implementors are used by the `EntityFromPathId` extractor to fetch
/// the request entity or fail the request with a not found response.
pub trait FindableById {
    /// The model of the entity that is returned by the query
    type Model;

    fn find_by_path_id(
        id: i32,
        db: &DatabaseConnection,
    ) -> impl std::future::Future<Output = Result<Option<Self::Model>, DbErr>> + Send;
}
