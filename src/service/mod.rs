pub mod accounts;
pub mod authorization;
pub mod password;
pub mod roster_export;
