use std::env;
use std::sync::LazyLock;

macro_rules! lazy_env_var {
    ($name:ident) => {
        pub static $name: LazyLock<String> = LazyLock::new(|| {
            let var_name = stringify!($name);
            env::var(var_name).expect(&format!("{} must be set", var_name))
        });
    };
    ($name:ident, $default:expr) => {
        pub static $name: LazyLock<String> =
            LazyLock::new(|| env::var(stringify!($name)).unwrap_or_else(|_| $default.to_string()));
    };
}

lazy_env_var!(JWT_SECRET_KEY);
lazy_env_var!(COOKIE_NAME, "admin_session");
lazy_env_var!(MONGODB_URI, "mongodb://localhost:27017/agrioth");
lazy_env_var!(USE_DIRECT_MONGO, "true");
lazy_env_var!(SERVER_ADDR, "127.0.0.1:8000");
lazy_env_var!(ALLOWED_ORIGIN, "http://localhost:3000");
lazy_env_var!(STORE_CONNECT_ATTEMPTS, "3");
lazy_env_var!(STORE_RETRY_DELAY_MS, "500");
lazy_env_var!(STORE_TIMEOUT_MS, "5000");
lazy_env_var!(STORE_RETRY_COOLDOWN_MS, "30000");

pub const DEFAULT_DB_NAME: &str = "agrioth";

pub const USER_COL_NAME: &str = "users";
pub const BOX_COL_NAME: &str = "boxes";
pub const SUBSCRIPTION_COL_NAME: &str = "subscriptions";
pub const FEEDBACK_COL_NAME: &str = "feedbacks";
pub const ACTIVITY_COL_NAME: &str = "activities";

pub const DEFAULT_ACTIVITY_LIMIT: i64 = 10;
