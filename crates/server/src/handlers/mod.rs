/// Authentication-related routes.
pub(crate) mod auth;

/// Simulated blockchain routes.
pub(crate) mod blockchain;

/// AI chat assistant routes.
pub(crate) mod chat;

/// Contract listing management routes.
pub(crate) mod contracts;

/// Agricultural news routes.
pub(crate) mod news;
