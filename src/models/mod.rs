//! Entity records used by the demos.
//!
//! Each type maps one table. Relationship accessors take the session they
//! should query through.

pub mod car;
pub mod cat;
pub mod human;
pub mod humanoid;
pub mod person;
pub mod sequence;
pub mod website;

pub use car::{Car, HumanCarAssociation};
pub use cat::Cat;
pub use human::Human;
pub use humanoid::{BarCode, Humanoid};
pub use person::{Offence, Person};
pub use sequence::{PlainRow, SequencedRow};
pub use website::{User, Website};
