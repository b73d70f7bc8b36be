use crate::config::Config;
use crate::domain::models::auth::Role;
use crate::error::AppError;

/// Shared-secret gate: one password per role. The resulting role is held
/// by the client and is not re-checked on booking endpoints.
pub struct AuthService {
    admin_password: String,
    user_password: String,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            admin_password: config.admin_password.clone(),
            user_password: config.user_password.clone(),
        }
    }

    pub fn authenticate(&self, password: &str) -> Result<Role, AppError> {
        if password.is_empty() {
            return Err(AppError::Unauthorized);
        }
        if password == self.admin_password {
            Ok(Role::Admin)
        } else if password == self.user_password {
            Ok(Role::User)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
