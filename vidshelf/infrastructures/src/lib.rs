pub mod boundaries;

pub mod gateways {
    pub mod api;
    pub mod credentials;
    pub mod launchers;
    pub mod metadata;
}

pub(crate) mod utils;
