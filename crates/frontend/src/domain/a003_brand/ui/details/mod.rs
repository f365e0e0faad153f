use contracts::domain::a003_brand::aggregate::{Brand, BrandDto, BrandStatus, BRAND_CATEGORIES};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::image_data_url::{first_selected_file, read_file_as_data_url};
use crate::shared::list_state::FormMode;

/// Форма бренда с загрузкой логотипа.
///
/// Логотип хранится в записи как data URL; пустое значение снимает логотип.
#[component]
pub fn BrandForm(
    mode: FormMode<Brand>,
    on_close: Callback<()>,
    on_submit: Callback<BrandDto, Result<(), String>>,
) -> impl IntoView {
    let (title, initial) = match &mode {
        FormMode::Create => ("Новый бренд".to_string(), BrandDto::default()),
        FormMode::Edit(brand) => (format!("Редактирование: {}", brand.name), BrandDto::from(brand)),
    };

    let name = RwSignal::new(initial.name);
    let description = RwSignal::new(initial.description);
    let category = RwSignal::new(initial.category);
    let status = RwSignal::new(initial.status.as_str().to_string());
    let image: RwSignal<Option<String>> = RwSignal::new(initial.image);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_image_change = move |ev: leptos::ev::Event| {
        let Some(file) = first_selected_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match read_file_as_data_url(file).await {
                Ok(url) => image.set(Some(url)),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_save = move |_| {
        set_error.set(None);
        let dto = BrandDto {
            name: name.get_untracked(),
            description: description.get_untracked(),
            category: category.get_untracked(),
            status: BrandStatus::from_code(&status.get_untracked()).unwrap_or_default(),
            image: image.get_untracked(),
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

                    <div class="form__row">
                        <div class="form__group">
                            <Label>"Категория *"</Label>
                            <Select value=category>
                                <option value="">"-- Выберите категорию --"</option>
                                {BRAND_CATEGORIES.into_iter().map(|c| view! {
                                    <option value=c>{c}</option>
                                }).collect_view()}
                            </Select>
                        </div>
                        <div class="form__group">
                            <Label>"Статус"</Label>
                            <Select value=status>
                                {BrandStatus::ALL.into_iter().map(|s| view! {
                                    <option value=s.as_str()>{s.label()}</option>
                                }).collect_view()}
                            </Select>
                        </div>
                    </div>

                    <div class="form__group">
                        <Label>"Логотип"</Label>
                        {move || match image.get() {
                            Some(src) => view! {
                                <div class="image-preview">
                                    <img src=src alt="Логотип" />
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| image.set(None)
                                    >
                                        {icon("trash")}
                                        " Удалить"
                                    </Button>
                                </div>
                            }.into_any(),
                            None => view! {
                                <input type="file" accept="image/*" on:change=on_image_change />
                            }.into_any(),
                        }}
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
