use sea_orm::{ActiveValue, Paginator, SelectorTrait, Set};
use utoipa::ToSchema;

use crate::database::error::DbError;
use crate::modules::common::dto::{Pagination, PaginationResult};

/// `Set(v)` if the option contains a value, `NotSet` otherwise, useful
/// for update endpoints where an absent field means "keep the current value"
pub fn set_if_some<T>(opt: Option<T>) -> ActiveValue<T>
where
    sea_orm::Value: From<T>,
{
    match opt {
        Some(v) => Set(v),
        None => ActiveValue::NotSet,
    }
}

/// Executes a paginated query, fetching its items, number of items and number
/// of pages into a `PaginationResult`
pub async fn paginated_query_to_pagination_result<
    'db,
    C: sea_orm::ConnectionTrait,
    S: sea_orm::SelectorTrait,
>(
    paginator: Paginator<'db, C, S>,
    pagination: Pagination,
) -> Result<PaginationResult<S::Item>, DbError>
where
    for<'_s> <S as SelectorTrait>::Item: ToSchema<'_s>,
{
    let n = paginator.num_items_and_pages().await?;
    let records = paginator.fetch_page(pagination.page - 1).await?;

    let result = PaginationResult {
        page: pagination.page,
        records,
        page_size: pagination.page_size,
        item_count: n.number_of_items,
        page_count: n.number_of_pages,
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_if_some_keeps_absent_fields_unset() {
        assert_eq!(set_if_some(Some(1)), Set(1));
        assert_eq!(set_if_some::<i32>(None), ActiveValue::<i32>::NotSet);
    }
}
