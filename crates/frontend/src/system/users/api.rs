use chrono::NaiveDate;
use contracts::shared::config::app_config;
use contracts::system::users::{User, UserRole, UserStatus};
use gloo_timers::future::TimeoutFuture;

/// Загрузка списка пользователей (демо-данные с имитацией задержки)
pub async fn fetch_users() -> Result<Vec<User>, String> {
    TimeoutFuture::new(app_config().simulation.users_delay_ms).await;
    let users = seed_users()?;
    log::debug!("Загружено пользователей: {}", users.len());
    Ok(users)
}

fn seed_users() -> Result<Vec<User>, String> {
    let date = NaiveDate::from_ymd_opt(2021, 1, 1).ok_or("Некорректная дата в демо-данных")?;
    let rows: [(&str, UserRole, UserStatus, u32); 10] = [
        ("A", UserRole::Admin, UserStatus::Active, 21),
        ("B", UserRole::User, UserStatus::Active, 12),
        ("C", UserRole::Admin, UserStatus::Disabled, 15),
        ("D", UserRole::User, UserStatus::Disabled, 13),
        ("E", UserRole::User, UserStatus::Active, 14),
        ("F", UserRole::User, UserStatus::Active, 18),
        ("G", UserRole::User, UserStatus::Active, 20),
        ("H", UserRole::User, UserStatus::Active, 22),
        ("I", UserRole::User, UserStatus::Active, 24),
        ("J", UserRole::Admin, UserStatus::Active, 26),
    ];

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, (letter, role, status, total_orders))| User {
            id: (i + 1).to_string(),
            name: format!("Nguyen Van {}", letter),
            email: format!("nguyenvan{}@example.com", letter),
            phone: "1234567890".to_string(),
            role,
            created_at: date,
            status,
            total_orders,
            last_login: Some(date),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_users() {
        let users = seed_users().unwrap();
        assert_eq!(users.len(), 10);
        assert_eq!(users[0].id, "1");
        assert_eq!(users[9].email, "nguyenvanJ@example.com");
        assert_eq!(users.iter().filter(|u| u.role == UserRole::Admin).count(), 3);
        assert_eq!(users.iter().filter(|u| u.status == UserStatus::Disabled).count(), 2);
    }
}
