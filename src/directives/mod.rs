//! Directive parsing and validation.
//!
//! # Data Flow
//! ```text
//! resource metadata (annotations / config data)
//!     → map.rs (typed lookups: absent | valid | invalid)
//!     → lists.rs, units.rs, lb_method.rs, thresholds.rs, numeric.rs
//!         (one grammar per directive)
//!     → typed values / normalized strings handed to config assembly
//!
//! annotations.rs checks a whole map against the known-key registry and
//! reports every rejected key at once.
//! ```
//!
//! # Design Decisions
//! - Free functions only; no shared state, safe from any thread
//! - Inputs are never mutated; validators return the input unchanged
//! - Grammars are closed sets: an unknown extra token fails the value
//! - Errors name the directive and echo the input; map lookups also name
//!   the owning resource

pub mod annotations;
pub mod error;
pub mod lb_method;
pub mod lists;
pub mod map;
pub mod numeric;
pub mod source;
pub mod thresholds;
pub mod units;

pub use annotations::{directive_kind, validate_annotations, DirectiveKind};
pub use error::{MapKeyError, NumberError, NumberErrorKind, ParseError, ParseResult};
pub use lb_method::{parse_lb_method, parse_lb_method_for_plus, parse_lb_method_with, LbDialect};
pub use lists::{
    parse_headers, parse_port_list, parse_rewrite_list, parse_service_list,
    parse_sticky_service_list, verify_path, Header, Rewrite, StickyService,
};
pub use map::{
    get_map_key_as_bool, get_map_key_as_float64, get_map_key_as_int, get_map_key_as_int64,
    get_map_key_as_string_slice, get_map_key_as_uint64, MapValue, StringMap,
};
pub use numeric::{parse_bool, parse_float64, parse_int, parse_int64, parse_uint64};
pub use source::{AnnotationSource, ResourceKind};
pub use thresholds::verify_app_protect_thresholds;
pub use units::{parse_offset, parse_proxy_buffers_spec, parse_size, parse_time};
