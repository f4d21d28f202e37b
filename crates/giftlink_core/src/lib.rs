pub mod domain;
pub mod ports;
pub mod query;

pub use domain::{
    normalize_email, AuthSession, Category, Condition, Gift, GiftAttributes, GiftDraft, NewGift,
    NewUser, User, UserCredentials, ValidationError,
};
pub use ports::{DatabaseService, PortError, PortResult};
pub use query::GiftQuery;
