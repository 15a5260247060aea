//! Wire models returned by the catalog backend.

mod denomination;
mod designer;
mod first_day_cover;
mod stamp;
mod tariff;

pub use denomination::Denomination;
pub use designer::Designer;
pub use first_day_cover::{FirstDayCover, FirstDayCoverImages, FirstDayCoverRelease};
pub use stamp::{Stamp, StampImages, StampMeta, StampRelease};
pub use tariff::{CurrencyTariffs, TariffRecord};
