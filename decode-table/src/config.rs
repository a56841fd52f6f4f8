//! Generator configuration and entry points.
use once_cell::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::error::GenerationError;
use crate::families::Family;
use crate::irregular::{IrregularOpcodeRegistry, LOAD_TRANSFER_LITERALS};
use crate::registers::FieldTable;
use crate::table::{DecodeTable, DecodeTableEntry, EntrySource, TableEmitter};

/// Which families and literals make up a generated table.
///
/// The default is the complete load/transfer group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub families: Vec<Family>,
    pub literals: Vec<DecodeTableEntry>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            families: Family::ALL.to_vec(),
            literals: LOAD_TRANSFER_LITERALS.to_vec(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_families(mut self, families: &[Family]) -> Self {
        self.families = families.to_vec();
        self
    }

    #[must_use]
    pub fn with_literals(mut self, literals: &[DecodeTableEntry]) -> Self {
        self.literals = literals.to_vec();
        self
    }

    /// Appends one more literal to the configured set
    #[must_use]
    pub fn with_literal(mut self, literal: DecodeTableEntry) -> Self {
        self.literals.push(literal);
        self
    }
}

/// Validates the code tables, enumerates every configured family, admits the
/// literals and emits the merged table.
#[instrument(skip(config), fields(families = config.families.len(), literals = config.literals.len()))]
pub fn generate(config: &GeneratorConfig) -> Result<DecodeTable, GenerationError> {
    for table in FieldTable::ALL {
        table.validate()?;
    }

    let mut emitter = TableEmitter::new();
    for &family in &config.families {
        let entries = family.enumerate()?;
        debug!(%family, count = entries.len(), "family enumerated");
        emitter.extend(EntrySource::Family(family), entries);
    }

    let registry = IrregularOpcodeRegistry::admit(&config.literals, emitter.pending())?;
    emitter.extend(EntrySource::Irregular, registry.into_entries());

    let table = emitter.emit()?;
    info!(entries = table.len(), "decode table generated");
    Ok(table)
}

static LOAD_TRANSFER_TABLE: OnceCell<DecodeTable> = OnceCell::new();

/// The default load/transfer table, generated on first use.
pub fn load_transfer_table() -> Result<&'static DecodeTable, GenerationError> {
    LOAD_TRANSFER_TABLE.get_or_try_init(|| generate(&GeneratorConfig::default()))
}
