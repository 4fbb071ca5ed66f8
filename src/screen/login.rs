//! Sign-in screen: the only public route. On success the token goes into the
//! session and navigation resumes at the preserved destination.

use crate::api::{ApiError, ApiGateway};
use crate::model::entity::{LoginData, LoginPayload};
use crate::nav::Navigator;
use crate::notice::Notices;
use crate::session::Session;

#[derive(Debug, Default)]
pub struct LoginScreen {
    email: String,
    password: String,
    loading: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub async fn submit<G: ApiGateway>(
        &mut self,
        api: &G,
        notices: &Notices,
        session: &Session,
        navigator: &Navigator,
    ) -> bool {
        let payload = LoginPayload {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        self.loading = true;
        let outcome = api.create::<_, LoginData>("/auths/login", &payload).await;
        self.loading = false;

        match outcome {
            Ok(reply) => {
                let message = reply.message_or("Welcome back!");
                let Some(data) = reply.data else {
                    notices.error("Invalid email or password!");
                    return false;
                };
                match session.set_token(data.token()) {
                    Ok(_) => {
                        notices.success(message);
                        self.password.clear();
                        let destination = navigator.take_pending();
                        navigator.go(session, destination);
                        true
                    }
                    Err(e) => {
                        crate::error::log_error(&e);
                        notices.error("Invalid email or password!");
                        false
                    }
                }
            }
            Err(ApiError::Rejected { .. }) => {
                notices.error("Invalid email or password!");
                false
            }
            Err(e) => {
                notices.error(e.user_message_or("Login failed. Please try again."));
                false
            }
        }
    }

    /// Logout: tear the session down and land on the login route with no
    /// preserved destination.
    pub fn logout(session: &Session, navigator: &Navigator) {
        session.teardown();
        navigator.reset_to_login();
    }
}
