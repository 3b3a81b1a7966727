use crate::domain::commands::accounts::{LoginCommand, RegisterCommand, SessionResult};
use crate::domain::models::User;
use shared::{LoginRequest, RegisterRequest, SessionResponse, UserProfile};

pub struct AccountMapper;

impl AccountMapper {
    pub fn register_command(request: RegisterRequest) -> RegisterCommand {
        RegisterCommand {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }

    pub fn login_command(request: LoginRequest) -> LoginCommand {
        LoginCommand {
            email: request.email,
            password: request.password,
        }
    }

    /// The password hash never leaves the domain
    pub fn to_profile(user: User) -> UserProfile {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }

    pub fn to_session_response(result: SessionResult) -> SessionResponse {
        SessionResponse {
            token: result.token,
            user: Self::to_profile(result.user),
        }
    }
}
