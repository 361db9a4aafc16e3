use serde::{Deserialize, Serialize};

/// 登录用户（由外部身份组件提供）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AppUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            roles: Vec::new(),
        }
    }
}

/// 按用户区分的存储键，未登录时使用访客键
///
/// 例如 `yds-analysis-history-ayse@example.com` / `yds-analysis-history-guest`
pub fn storage_key(prefix: &str, user: Option<&AppUser>) -> String {
    match user {
        Some(u) if !u.email.is_empty() => format!("{}-{}", prefix, u.email),
        _ => format!("{}-guest", prefix),
    }
}
