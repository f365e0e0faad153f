use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const USERNAME_MIN_LEN: usize = 3;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Ошибки заполнения форм входа и регистрации
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFormError {
    #[error("Поле \"{0}\" обязательно для заполнения")]
    Required(&'static str),
    #[error("Некорректный email")]
    InvalidEmail,
    #[error("Имя пользователя должно содержать не менее 3 символов")]
    UsernameTooShort,
    #[error("Пароль должен содержать не менее 8 символов")]
    PasswordTooShort,
    #[error("Пароли не совпадают")]
    PasswordMismatch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AuthFormError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AuthFormError::Required("Пароль"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), AuthFormError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(AuthFormError::Required("Имя пользователя"));
        }
        if username.chars().count() < USERNAME_MIN_LEN {
            return Err(AuthFormError::UsernameTooShort);
        }
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AuthFormError::Required("Пароль"));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(AuthFormError::PasswordTooShort);
        }
        if self.confirm_password.is_empty() {
            return Err(AuthFormError::Required("Подтверждение пароля"));
        }
        if self.password != self.confirm_password {
            return Err(AuthFormError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Пользователь текущей (имитируемой) сессии
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
}

fn validate_email(email: &str) -> Result<(), AuthFormError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthFormError::Required("Email"));
    }
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AuthFormError::InvalidEmail)
    }
}

/// Простая проверка формы адреса: local@domain.tld без пробелов
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupForm {
        SignupForm {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("nguyenvanA@example.com"));
        assert!(is_valid_email("a.b@mail.example.vn"));
        assert!(!is_valid_email("example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn test_login_validation() {
        let mut form = LoginForm::default();
        assert_eq!(form.validate(), Err(AuthFormError::Required("Email")));

        form.email = "not-an-email".into();
        assert_eq!(form.validate(), Err(AuthFormError::InvalidEmail));

        form.email = "admin@example.com".into();
        assert_eq!(form.validate(), Err(AuthFormError::Required("Пароль")));

        form.password = "x".into();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_signup_validation() {
        assert_eq!(signup().validate(), Ok(()));

        let mut form = signup();
        form.username = "ab".into();
        assert_eq!(form.validate(), Err(AuthFormError::UsernameTooShort));

        let mut form = signup();
        form.password = "short".into();
        form.confirm_password = "short".into();
        assert_eq!(form.validate(), Err(AuthFormError::PasswordTooShort));

        let mut form = signup();
        form.confirm_password = "password2".into();
        assert_eq!(form.validate(), Err(AuthFormError::PasswordMismatch));
        assert_eq!(
            AuthFormError::PasswordMismatch.to_string(),
            "Пароли не совпадают"
        );
    }
}
