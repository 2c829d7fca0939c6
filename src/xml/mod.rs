//! XML-Schicht: Config-Parsing und Template-Baum.
//!
//! `parser` liest AutoDrive-Configs (Structure of Arrays) in die RoadMap,
//! `tree` stellt den eigenen XML-Baum für die Template-Bearbeitung bereit.

pub mod parser;
pub mod tree;

pub use parser::parse_autodrive_config;
pub use tree::{encode_latin1, Element, XmlNode, XML_DECL_ISO_8859_1, XML_DECL_UTF8};
