//! Configuration section definitions.
//!
//! Each module corresponds to a section in `qr-placeholder.toml`:
//!
//! | Module  | TOML Section | Purpose                                 |
//! |---------|--------------|-----------------------------------------|
//! | `serve` | `[serve]`    | Listener, mount path, workers, static   |
//! | `qr`    | `[qr]`       | Error correction level, quiet zone      |
//! | `svg`   | `[svg]`      | Vector optimizer pass limit             |

mod qr;
mod serve;
mod svg;

pub use qr::{MAX_MARGIN, QrConfig};
pub use serve::ServeConfig;
pub use svg::{PASS_RANGE, SvgConfig};
