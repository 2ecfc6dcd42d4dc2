//! User-facing response messages.
//!
//! Clients of the service are Ukrainian-language front-ends, so every message
//! that ends up in a JSON body lives here. The 404 for a missing file on read
//! is English in the deployed service and is kept that way.

pub const HEALTH_CHECK: &str = "Hello world";

pub const UPLOAD_SUCCESS: &str = "Файл успішно завантажено";
pub const UPLOAD_MISSING_FILE: &str = "Необхідно додати файл";
pub const UPLOAD_FAILED: &str = "Сталася помилка при завантаженні файлу";
pub const UPLOAD_TOO_LARGE: &str = "Файл завеликий";

pub const FORBIDDEN: &str = "Доступ заборонено: неправильний API ключ";

pub const RETRIEVE_FAILED: &str = "Сталась помилка отримання файлу";

pub const DELETE_SUCCESS: &str = "Файл успішно видалено";
pub const DELETE_MISSING_FILENAME: &str = "Необхідно передати назву файла";
pub const DELETE_FAILED: &str = "Сталася помилка при видаленні файлу";

pub const INVALID_FILENAME: &str = "Некоректна назва файлу";

pub fn file_not_found(filename: &str) -> String {
    format!("File {} not found", filename)
}

pub fn delete_not_found(filename: &str) -> String {
    format!("Файл {} не знайдено", filename)
}

pub fn unsupported_media_type(content_type: &str) -> String {
    format!("Непідтримуваний тип файлу: {}", content_type)
}

pub const INTERNAL_ERROR: &str = "Сталася внутрішня помилка сервера";
