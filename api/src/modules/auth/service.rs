use super::dto::UserDto;
use crate::modules::auth::session::{SessionId, SESSION_DAYS_DURATION};
use anyhow::Result;
use bcrypt::verify;
use chrono::{Duration, Utc};
use ipnetwork::IpNetwork;
use rand_chacha::ChaCha8Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

pub enum UserFromCredentialsError {
    NotFound,
    InternalError,
    InvalidPassword,
}

#[derive(Clone)]
pub struct AuthService {
    rng: Arc<Mutex<ChaCha8Rng>>,
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, rng: ChaCha8Rng) -> Self {
        AuthService {
            db,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// generates a new session token and creates a new session record on the DB for the user
    pub async fn new_session(
        &self,
        user_identifier: i32,
        client_ip: IpAddr,
        client_user_agent: String,
    ) -> Result<SessionId> {
        let ses_token = SessionId::generate_new(&mut self.rng.lock().unwrap());

        let new_session = entity::session::ActiveModel {
            ip: Set(IpNetwork::from(client_ip).to_string()),
            user_agent: Set(client_user_agent),
            expires_at: Set((Utc::now() + Duration::days(SESSION_DAYS_DURATION)).into()),
            user_id: Set(user_identifier),
            session_token: Set(ses_token.into_database_value()),
            ..Default::default()
        };

        new_session.insert(&self.db).await?;

        Ok(ses_token)
    }

    /// deletes a session by its token
    pub async fn delete_session(&self, session_id: &SessionId) -> Result<()> {
        entity::session::Entity::delete_many()
            .filter(entity::session::Column::SessionToken.eq(session_id.into_database_value()))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// gets the user from the session token if the session is not expired
    pub async fn get_user_from_session_id(
        &self,
        session_id: SessionId,
    ) -> Result<Option<entity::user::Model>> {
        let user = entity::user::Entity::find()
            .inner_join(entity::session::Entity)
            .filter(entity::session::Column::ExpiresAt.gt(Utc::now()))
            .filter(entity::session::Column::SessionToken.eq(session_id.into_database_value()))
            .one(&self.db)
            .await?;

        Ok(user)
    }

    /// finds a user from email and plain text password, verifying the password
    pub async fn get_user_from_credentials(
        &self,
        user_email: String,
        user_password: String,
    ) -> Result<UserDto, UserFromCredentialsError> {
        let user = entity::user::Entity::find()
            .filter(entity::user::Column::Email.eq(user_email))
            .one(&self.db)
            .await
            .map_err(|_| UserFromCredentialsError::InternalError)?;

        match user {
            Some(user) => {
                let password_valid = verify(user_password, &user.password)
                    .map_err(|_| UserFromCredentialsError::InternalError)?;

                if password_valid {
                    Ok(UserDto::from(user))
                } else {
                    Err(UserFromCredentialsError::InvalidPassword)
                }
            }
            None => Err(UserFromCredentialsError::NotFound),
        }
    }
}
