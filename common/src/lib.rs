//! Admin Dashboard Common Library
//!
//! CLIとWeb(WASM)で共有されるビューモデルと型

pub mod api;
pub mod error;
pub mod record;
pub mod routes;
pub mod session;
pub mod store;
pub mod table;
pub mod types;
pub mod value;
pub mod view;

pub use api::Endpoints;
pub use error::{Error, Result, StoreError};
pub use record::Record;
pub use session::{Capability, Session, SessionGate};
pub use store::RecordStore;
pub use table::{LoadOutcome, LoadTicket, Projection, TabularViewModel};
pub use types::{Currency, CurrencyValue, NewUser, Profile, ProfileUpdate, User, UserUpdate};
pub use value::FieldValue;
pub use view::{PageInfo, SortDirection, ViewState, PAGE_SIZES};
