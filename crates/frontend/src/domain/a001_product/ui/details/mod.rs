use contracts::domain::a001_product::aggregate::{Product, ProductDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::shared::image_data_url::{first_selected_file, read_file_as_data_url};
use crate::shared::list_state::FormMode;

/// Цена из поля формы: целое число донгов, не меньше нуля
fn parse_price(input: &str) -> Result<i64, String> {
    let cleaned: String = input.chars().filter(|c| !matches!(c, ' ' | '.' | ',')).collect();
    if cleaned.is_empty() {
        return Ok(0);
    }
    match cleaned.parse::<i64>() {
        Ok(price) if price >= 0 => Ok(price),
        _ => Err("Цена должна быть неотрицательным целым числом".to_string()),
    }
}

#[component]
pub fn ProductForm(
    mode: FormMode<Product>,
    on_close: Callback<()>,
    on_submit: Callback<ProductDto, Result<(), String>>,
) -> impl IntoView {
    let (title, initial) = match &mode {
        FormMode::Create => ("Новый товар".to_string(), ProductDto::default()),
        FormMode::Edit(product) => (
            format!("Редактирование: {}", product.name),
            ProductDto::from(product),
        ),
    };

    let name = RwSignal::new(initial.name);
    let price = RwSignal::new(initial.price.to_string());
    let category = RwSignal::new(initial.category);
    let brand = RwSignal::new(initial.brand);
    let description = RwSignal::new(initial.description);
    let image_url = RwSignal::new(initial.image_url);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_image_change = move |ev: leptos::ev::Event| {
        let Some(file) = first_selected_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match read_file_as_data_url(file).await {
                Ok(url) => image_url.set(url),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_save = move |_| {
        set_error.set(None);
        let parsed_price = match parse_price(&price.get_untracked()) {
            Ok(value) => value,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };
        let dto = ProductDto {
            name: name.get_untracked(),
            price: parsed_price,
            image_url: image_url.get_untracked(),
            description: description.get_untracked(),
            category: category.get_untracked(),
            brand: brand.get_untracked(),
        };
        if let Err(e) = on_submit.run(dto) {
            set_error.set(Some(e));
        }
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal modal--wide" on:click=move |ev| ev.stop_propagation()>
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

                    <div class="form__row">
                        <div class="form__group">
                            <Label>"Цена, ₫"</Label>
                            <Input value=price input_type=InputType::Number />
                        </div>
                        <div class="form__group">
                            <Label>"Категория *"</Label>
                            <Input value=category placeholder="Smartphones" />
                        </div>
                        <div class="form__group">
                            <Label>"Бренд *"</Label>
                            <Input value=brand placeholder="Apple" />
                        </div>
                    </div>

                    <div class="form__group">
                        <Label>"Описание"</Label>
                        <Textarea value=description />
                    </div>

                    <div class="form__group">
                        <Label>"Изображение"</Label>
                        <Input value=image_url placeholder="https://..." />
                        <input type="file" accept="image/*" on:change=on_image_change />
                        {move || {
                            let src = image_url.get();
                            (!src.trim().is_empty()).then(|| view! {
                                <div class="image-preview">
                                    <img src=src alt="Предпросмотр" />
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| image_url.set(String::new())
                                    >
                                        {icon("trash")}
                                        " Убрать"
                                    </Button>
                                </div>
                            })
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("21990000"), Ok(21_990_000));
        assert_eq!(parse_price("21.990.000"), Ok(21_990_000));
        assert_eq!(parse_price(" "), Ok(0));
        assert!(parse_price("-5").is_err());
        assert!(parse_price("abc").is_err());
    }
}
