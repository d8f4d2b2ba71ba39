//! Attribute and class types a classifier can be trained on.
use std::collections::BTreeSet;
use std::fmt::{self, Display};

use crate::error::{Error, Result};
use crate::table::{AttributeKind, Table};

/// A single kind of data a classifier accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    NumericAttributes,
    NominalAttributes,
    DateAttributes,
    MissingValues,
    NumericClass,
    DateClass,
    NominalClass,
    BinaryClass,
    UnaryClass,
    MissingClassValues,
    NoClass,
}

impl Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            Capability::NumericAttributes => "numeric attributes",
            Capability::NominalAttributes => "nominal attributes",
            Capability::DateAttributes => "date attributes",
            Capability::MissingValues => "missing values",
            Capability::NumericClass => "numeric class",
            Capability::DateClass => "date class",
            Capability::NominalClass => "nominal class",
            Capability::BinaryClass => "binary class",
            Capability::UnaryClass => "unary class",
            Capability::MissingClassValues => "missing class values",
            Capability::NoClass => "no class",
        };
        f.write_str(s)
    }
}

/// Set of enabled capabilities plus the minimum number of usable rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    enabled: BTreeSet<Capability>,
    minimum_instances: usize,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities { enabled: BTreeSet::new(), minimum_instances: 1 }
    }
}

impl Capabilities {
    pub fn enable(&mut self, capability: Capability) -> &mut Self {
        self.enabled.insert(capability);
        self
    }

    pub fn disable(&mut self, capability: Capability) -> &mut Self {
        self.enabled.remove(&capability);
        self
    }

    pub fn handles(&self, capability: Capability) -> bool {
        self.enabled.contains(&capability)
    }

    pub fn enabled(&self) -> impl Iterator<Item = Capability> + '_ {
        self.enabled.iter().copied()
    }

    pub fn minimum_instances(&self) -> usize {
        self.minimum_instances
    }

    pub fn set_minimum_instances(&mut self, minimum: usize) -> &mut Self {
        self.minimum_instances = minimum;
        self
    }

    /// Check that `table` only uses enabled capabilities.
    ///
    /// The first unmet capability is reported as [`Error::Unsupported`](crate::Error::Unsupported).
    pub fn test(&self, table: &Table) -> Result<()> {
        for (i, attr) in table.attributes().iter().enumerate() {
            if Some(i) == table.class_index() {
                continue;
            }
            let needed = match attr.kind() {
                AttributeKind::Numeric => Capability::NumericAttributes,
                AttributeKind::Nominal(_) => Capability::NominalAttributes,
                AttributeKind::Date => Capability::DateAttributes,
            };
            self.require(needed, || format!("attribute '{}'", attr.name()))?;
        }

        if table.has_missing_attribute_values() {
            self.require(Capability::MissingValues, || "attribute values are missing".to_owned())?;
        }

        match table.class_attribute() {
            None => self.require(Capability::NoClass, || "no class attribute set".to_owned())?,
            Some(class) => {
                match class.kind() {
                    AttributeKind::Numeric => {
                        self.require(Capability::NumericClass, || format!("class '{}'", class.name()))?
                    }
                    AttributeKind::Date => {
                        self.require(Capability::DateClass, || format!("class '{}'", class.name()))?
                    }
                    AttributeKind::Nominal(labels) => {
                        let needed = match labels.len() {
                            0 | 1 => Capability::UnaryClass,
                            2 => Capability::BinaryClass,
                            _ => Capability::NominalClass,
                        };
                        self.require(needed, || {
                            format!("class '{}' has {} labels", class.name(), labels.len())
                        })?;
                    }
                }
                if table.num_missing_class() > 0 {
                    self.require(Capability::MissingClassValues, || {
                        format!("class '{}' has missing values", class.name())
                    })?;
                }
            }
        }

        let usable = table.num_rows() - table.num_missing_class();
        if usable < self.minimum_instances {
            return Err(Error::Data(format!(
                "at least {} instance(s) with a class value required, got {}",
                self.minimum_instances, usable
            )));
        }

        Ok(())
    }

    fn require<F: FnOnce() -> String>(&self, capability: Capability, detail: F) -> Result<()> {
        if self.handles(capability) {
            Ok(())
        } else {
            Err(Error::unsupported(capability, detail()))
        }
    }
}
