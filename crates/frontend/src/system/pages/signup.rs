use contracts::shared::config::app_config;
use contracts::system::auth::{SignupForm, PASSWORD_MIN_LEN};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::{use_auth, AuthScreen};

#[component]
pub fn SignupPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();
    let to_login = move || set_auth_state.update(|s| s.screen = AuthScreen::Login);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let form = SignupForm {
            username: username.get(),
            email: email.get(),
            password: password.get(),
            confirm_password: confirm_password.get(),
        };
        if let Err(e) = form.validate() {
            set_error_message.set(Some(e.to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            TimeoutFuture::new(app_config().simulation.auth_delay_ms).await;
            log::info!("Account registered: {}", form.username.trim());
            set_is_loading.set(false);
            to_login();
        });
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    type=kind
                    id=id
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                    disabled=move || is_loading.get()
                />
            </div>
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Admin Dashboard"</h1>
                <h2>"Регистрация"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit novalidate>
                    {field("username", "Имя пользователя", "text", username)}
                    {field("email", "Email", "email", email)}
                    {field("password", "Пароль", "password", password)}
                    {field("confirm-password", "Подтверждение пароля", "password", confirm_password)}

                    <p class="form-hint">
                        {format!("Пароль не короче {} символов", PASSWORD_MIN_LEN)}
                    </p>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Регистрация..." } else { "Зарегистрироваться" }}
                    </button>
                </form>

                <div class="login-info">
                    <p>
                        "Уже есть аккаунт? "
                        <a href="#" on:click=move |ev| {
                            ev.prevent_default();
                            to_login();
                        }>"Войти"</a>
                    </p>
                </div>
            </div>
        </div>
    }
}
