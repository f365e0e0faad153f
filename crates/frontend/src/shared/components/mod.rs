pub mod pagination_controls;
pub mod stat_card;
