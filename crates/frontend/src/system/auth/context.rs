use contracts::system::auth::SessionUser;
use leptos::prelude::*;

/// Какая из страниц входа показана неавторизованному пользователю
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthScreen {
    #[default]
    Login,
    Signup,
}

/// Состояние сессии хранится только в памяти: перезагрузка страницы выходит из системы
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<SessionUser>,
    pub screen: AuthScreen,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn signed_in(email: &str) -> Self {
        Self {
            session: Some(SessionUser {
                email: email.trim().to_string(),
            }),
            screen: AuthScreen::Login,
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Выйти из системы (сессия сбрасывается, показывается страница входа)
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    log::info!("User signed out");
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_in_state() {
        let state = AuthState::signed_in(" admin@example.com ");
        assert!(state.is_authenticated());
        assert_eq!(state.session.unwrap().email, "admin@example.com");
        assert!(!AuthState::default().is_authenticated());
        assert_eq!(AuthState::default().screen, AuthScreen::Login);
    }
}
