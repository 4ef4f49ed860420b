//! Breadcrumb – explains where pieces of a computation's output come from.
//!
//! A computation is a circuit of composable functions. Every time a function
//! is evaluated it leaves behind a *witness*: an immutable record of what
//! that particular evaluation did (where a pattern matched, which elements of
//! a list made a quantifier fail, ...). Given a piece of the final output,
//! Breadcrumb walks these witnesses backwards and builds an explanation tree
//! telling which pieces of the inputs produced it, and with what confidence.
//!
//! ## Modules
//! * [`designator`] – Addresses of sub-parts of values ([`designator::Range`],
//!   list elements, function ports) and their composition.
//! * [`witness`] – The [`witness::Witness`] contract, query kinds and the
//!   [`witness::Quality`] of a causal link.
//! * [`function`] – The [`function::Function`] contract and the
//!   [`function::Instance`] holding a function's last witness.
//! * [`functions`] – Concrete functions: n-ary linking, quantifiers, regex
//!   find, fork and apply-to-all.
//! * [`tree`] – The AND/OR explanation tree and its node keeper.
//! * [`tracer`] – The recursive tree builder and the [`tracer::Wiring`] it
//!   follows across functions.
//! * [`circuit`] – A minimal [`tracer::Wiring`] implementation.
//! * [`serial`] – Printed form of function configurations.
//! * [`settings`] – Settings loaded from file and environment.
//!
//! ## Quality
//! Every edge of a tree is tagged `Exact` (precise backward mapping), `Over`
//! (conservative superset of the true dependency) or `Under` (conservative
//! subset). Along a path the weakest link wins; see
//! [`witness::Quality::compose`].
//!
//! ## Quick Start
//! ```
//! use breadcrumb::{Circuit, Designator, Query, Tracer, Value};
//! use breadcrumb::functions::RegexFind;
//! let mut circuit = Circuit::new();
//! let find = circuit.add(Box::new(RegexFind::new("b+").unwrap()));
//! circuit.feed(find, 0, Value::from("aabbbcc")).unwrap();
//! assert_eq!(circuit.evaluate(find).unwrap(), vec![Value::from("bbb")]);
//! let designator: Designator = "out0/I1-2".parse().unwrap();
//! let tree = Tracer::new()
//!     .get_tree(&circuit, Query::Provenance, designator, find)
//!     .unwrap();
//! let leaf = tree.node(tree.leaves()[0]).object().unwrap();
//! assert_eq!(leaf.designator.to_string(), "in0/I3-4");
//! ```

pub mod circuit;
pub mod designator;
pub mod error;
pub mod function;
pub mod functions;
pub mod serial;
pub mod settings;
pub mod tracer;
pub mod tree;
pub mod value;
pub mod witness;

use core::hash::BuildHasherDefault;
use seahash::SeaHasher;

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

pub use circuit::Circuit;
pub use designator::{Designator, Part, Range, Target};
pub use error::{BreadcrumbError, Result};
pub use function::{Evaluation, Function, FunctionId, Instance};
pub use serial::{FunctionSpec, print_function, read_function};
pub use settings::Settings;
pub use tracer::{Tracer, Wiring};
pub use tree::{Edge, Node, NodeFactory, NodeId, NodeKeeper, NodeKind, ObjectKey, Tree};
pub use value::Value;
pub use witness::{LinkAll, Quality, Query, Witness};
