use contracts::system::users::{User, UserDto, UserRole, UserStatus};
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::list_state::FormMode;

/// Модальная форма создания/редактирования пользователя.
///
/// Проверка обязательных полей выполняется конвейером списка;
/// ошибка из `on_submit` показывается внутри формы.
#[component]
pub fn UserForm(
    mode: FormMode<User>,
    on_close: Callback<()>,
    on_submit: Callback<UserDto, Result<(), String>>,
) -> impl IntoView {
    let (title, initial) = match &mode {
        FormMode::Create => ("Новый пользователь".to_string(), UserDto::default()),
        FormMode::Edit(user) => (format!("Редактирование: {}", user.name), UserDto::from(user)),
    };

    let name = RwSignal::new(initial.name);
    let email = RwSignal::new(initial.email);
    let phone = RwSignal::new(initial.phone);
    let role = RwSignal::new(initial.role.as_str().to_string());
    let status = RwSignal::new(initial.status.as_str().to_string());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_save = move |_| {
        set_error.set(None);
        let dto = UserDto {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            role: UserRole::from_code(&role.get_untracked()).unwrap_or_default(),
            status: UserStatus::from_code(&status.get_untracked()).unwrap_or_default(),
        };
        if let Err(e) = on_submit.run(dto) {
            set_error.set(Some(e));
        }
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| on_close.run(())
                    >
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Имя *"</Label>
                        <Input value=name placeholder="Nguyen Van A" />
                    </div>

                    <div class="form__group">
                        <Label>"Email *"</Label>
                        <Input value=email input_type=InputType::Email placeholder="user@example.com" />
                    </div>

                    <div class="form__group">
                        <Label>"Телефон"</Label>
                        <Input value=phone />
                    </div>

                    <div class="form__row">
                        <div class="form__group">
                            <Label>"Роль"</Label>
                            <Select value=role>
                                {UserRole::ALL.into_iter().map(|r| view! {
                                    <option value=r.as_str()>{r.label()}</option>
                                }).collect_view()}
                            </Select>
                        </div>
                        <div class="form__group">
                            <Label>"Статус"</Label>
                            <Select value=status>
                                {UserStatus::ALL.into_iter().map(|s| view! {
                                    <option value=s.as_str()>{s.label()}</option>
                                }).collect_view()}
                            </Select>
                        </div>
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                    >
                        "Отмена"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                    >
                        {if mode.is_create() { "Создать" } else { "Сохранить" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
