// Keyword research HTTP surface: single seed, workflow webhook, batch.

pub mod handlers;
