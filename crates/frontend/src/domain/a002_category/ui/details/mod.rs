use contracts::domain::a002_category::aggregate::{Category, CategoryDto, CategoryStatus};
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::list_state::FormMode;

#[component]
pub fn CategoryForm(
    mode: FormMode<Category>,
    on_close: Callback<()>,
    on_submit: Callback<CategoryDto, Result<(), String>>,
) -> impl IntoView {
    let (title, initial) = match &mode {
        FormMode::Create => ("Новая категория".to_string(), CategoryDto::default()),
        FormMode::Edit(category) => (
            format!("Редактирование: {}", category.name),
            CategoryDto::from(category),
        ),
    };

    let name = RwSignal::new(initial.name);
    let description = RwSignal::new(initial.description);
    let status = RwSignal::new(initial.status.as_str().to_string());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_save = move |_| {
        set_error.set(None);
        let dto = CategoryDto {
            name: name.get_untracked(),
            description: description.get_untracked(),
            status: CategoryStatus::from_code(&status.get_untracked()).unwrap_or_default(),
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
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Название *"</Label>
                        <Input value=name />
                    </div>

                    <div class="form__group">
                        <Label>"Описание"</Label>
                        <Textarea value=description />
                    </div>

                    <div class="form__group">
                        <Label>"Статус"</Label>
                        <Select value=status>
                            {CategoryStatus::ALL.into_iter().map(|s| view! {
                                <option value=s.as_str()>{s.label()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                </div>

                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Отмена"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save>
                        {if mode.is_create() { "Создать" } else { "Сохранить" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
