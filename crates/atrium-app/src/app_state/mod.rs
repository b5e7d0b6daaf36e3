mod aux_windows;
mod core;
mod dialogs;
mod event_handler;
mod init;
mod polling;
mod restart;
mod shell;
mod shutdown;

pub use self::core::AtriumApp;
