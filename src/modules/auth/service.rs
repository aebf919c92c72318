use anyhow::anyhow;
use tracing::{info, instrument, warn};

use campusdesk_auth::create_access_token;
use campusdesk_config::JwtConfig;
use campusdesk_core::{AppError, hash_password, verify_password};
use campusdesk_models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, NewUser, SignupRequest, User,
};

use crate::metrics::track_login;
use crate::store::UserStore;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, dto), fields(user.email = %dto.email, user.role = %role))]
    pub async fn signup(
        users: &dyn UserStore,
        dto: SignupRequest,
        role: &str,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let user = users
            .create(NewUser {
                name: dto.name.trim().to_string(),
                email: normalize_email(&dto.email),
                password_hash,
                role: role.to_string(),
            })
            .await?;

        info!(user.id = %user.id, "User signed up");
        Ok(user)
    }

    #[instrument(skip(users, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login(
        users: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(credentials) = users.find_by_email(&normalize_email(&dto.email)).await? else {
            warn!("Login attempt for unknown email");
            track_login(false);
            return Err(AppError::unauthorized(anyhow!("Invalid email or password")));
        };

        if !verify_password(&dto.password, &credentials.password)? {
            warn!(user.id = %credentials.id, "Login attempt with wrong password");
            track_login(false);
            return Err(AppError::unauthorized(anyhow!("Invalid email or password")));
        }

        let access_token = create_access_token(
            credentials.id,
            &credentials.email,
            &credentials.role,
            jwt_config,
        )?;

        info!(user.id = %credentials.id, user.role = %credentials.role, "User logged in");
        track_login(true);

        Ok(LoginResponse {
            access_token,
            user: credentials.into(),
        })
    }

    #[instrument(skip(users, dto))]
    pub async fn change_password(
        users: &dyn UserStore,
        user_id: i64,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let credentials = users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized(anyhow!("User no longer exists")))?;

        if !verify_password(&dto.current_password, &credentials.password)? {
            warn!(user.id = %user_id, "Password change with wrong current password");
            return Err(AppError::unauthorized(anyhow!("Current password is incorrect")));
        }

        let password_hash = hash_password(&dto.new_password)?;
        if !users.update_password(user_id, &password_hash).await? {
            return Err(AppError::unauthorized(anyhow!("User no longer exists")));
        }

        info!(user.id = %user_id, "Password changed");
        Ok(())
    }
}
