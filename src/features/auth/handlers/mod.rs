pub mod auth_handler;

pub use auth_handler::{
    __path_logged_in, __path_login, __path_register, logged_in, login, register,
};
