use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub admin_password: String,
    pub user_password: String,
    pub studio_timezone: String, // IANA name, used for "today"
    pub venue_table_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            admin_password: env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set"),
            user_password: env::var("USER_PASSWORD").expect("USER_PASSWORD must be set"),
            studio_timezone: env::var("STUDIO_TIMEZONE").unwrap_or_else(|_| "Asia/Tokyo".to_string()),
            venue_table_path: env::var("VENUE_TABLE_PATH").ok().filter(|p| !p.is_empty()),
        }
    }
}
