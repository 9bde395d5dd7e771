// Database model structs

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Quiz {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub author_id: i64,
    pub author_name: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tip {
    pub id: i64,
    pub text: String,
    pub accepted: bool,
    pub quiz_id: i64,
    pub author_id: i64,
    pub author_name: Option<String>,
}
