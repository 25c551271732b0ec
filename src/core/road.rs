//! Straße: geordnete Abschnitte plus Vorgänger/Nachfolger (Straße oder Kreuzung).

use super::ids::{Id, INVALID_ID};
use crate::error::{EntityKind, WorldError, WorldResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub(crate) id: Id,
    pub(crate) in_stream_direction: bool,
    pub(crate) sections: Vec<Id>,
    pub(crate) length: f64,
    pub(crate) successor: Id,
    pub(crate) predecessor: Id,
}

impl Road {
    pub(crate) fn new(id: Id, in_stream_direction: bool) -> Self {
        Self {
            id,
            in_stream_direction,
            sections: Vec::new(),
            length: 0.0,
            successor: INVALID_ID,
            predecessor: INVALID_ID,
        }
    }

    pub fn exists(&self) -> bool {
        self.id != INVALID_ID
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn is_in_stream_direction(&self) -> bool {
        self.in_stream_direction
    }

    pub fn sections(&self) -> &[Id] {
        &self.sections
    }

    /// Summe der Abschnittslängen.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Nachfolger-ID (Straße oder Kreuzung) oder `INVALID_ID`.
    pub fn successor(&self) -> Id {
        self.successor
    }

    /// Vorgänger-ID (Straße oder Kreuzung) oder `INVALID_ID`.
    pub fn predecessor(&self) -> Id {
        self.predecessor
    }

    pub(crate) fn add_section(&mut self, section: Id) {
        self.sections.push(section);
    }

    pub(crate) fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    pub(crate) fn set_successor(&mut self, element: Id) -> WorldResult<()> {
        if self.successor != INVALID_ID {
            return Err(WorldError::SuccessorAlreadySet {
                kind: EntityKind::Road,
                id: self.id,
            });
        }
        self.successor = element;
        Ok(())
    }

    pub(crate) fn set_predecessor(&mut self, element: Id) -> WorldResult<()> {
        if self.predecessor != INVALID_ID {
            return Err(WorldError::PredecessorAlreadySet {
                kind: EntityKind::Road,
                id: self.id,
            });
        }
        self.predecessor = element;
        Ok(())
    }
}
