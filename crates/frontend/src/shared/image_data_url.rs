//! Кодирование выбранного изображения в data URL для предпросмотра и хранения в записи

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// MIME-тип по умолчанию, если браузер не сообщил тип файла
const FALLBACK_MIME: &str = "application/octet-stream";

/// Собирает `data:{mime};base64,{payload}`
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() { FALLBACK_MIME } else { mime.trim() };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Является ли строка встроенным изображением
pub fn is_image_data_url(value: &str) -> bool {
    value.starts_with("data:image/")
}

/// Читает файл целиком и возвращает data URL
pub async fn read_file_as_data_url(file: web_sys::File) -> Result<String, String> {
    use wasm_bindgen_futures::JsFuture;

    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Ошибка чтения файла: {:?}", e))?;

    let uint8_array = js_sys::Uint8Array::new(&array_buffer);
    let mut bytes = vec![0; uint8_array.length() as usize];
    uint8_array.copy_to(&mut bytes);

    log::debug!("Изображение '{}' прочитано: {} байт", file.name(), bytes.len());
    Ok(to_data_url(&file.type_(), &bytes))
}

/// Первый файл из `<input type="file">` события change
pub fn first_selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast;

    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
        assert_eq!(to_data_url("", b""), "data:application/octet-stream;base64,");
    }

    #[test]
    fn test_is_image_data_url() {
        assert!(is_image_data_url("data:image/jpeg;base64,AAAA"));
        assert!(!is_image_data_url("https://images.example.com/a.jpg"));
        assert!(!is_image_data_url("data:text/plain;base64,AAAA"));
    }
}
