//! Streams: lineare Verkettung von Spuren bzw. Straßen mit eigener Längskoordinate.
//!
//! Jedes Element liegt mit einem Offset und einer Richtung im Stream. Ein
//! Element gegen die Stream-Richtung beginnt bei `s_offset - length` und
//! zählt rückwärts.

use crate::core::{Id, Lane, MeasurementPoint, Road};

/// Element, das in einem [`Stream`] liegen kann.
pub trait StreamElement {
    fn id(&self) -> Id;

    fn length(&self) -> f64;

    /// s-Koordinate des Elementanfangs auf der eigenen Straße.
    fn start_distance(&self) -> f64;
}

impl StreamElement for Lane {
    fn id(&self) -> Id {
        Lane::id(self)
    }

    fn length(&self) -> f64 {
        Lane::length(self)
    }

    fn start_distance(&self) -> f64 {
        self.distance(MeasurementPoint::RoadStart)
    }
}

impl StreamElement for Road {
    fn id(&self) -> Id {
        Road::id(self)
    }

    fn length(&self) -> f64 {
        Road::length(self)
    }

    fn start_distance(&self) -> f64 {
        0.0
    }
}

/// Lage eines Elements im Stream.
#[derive(Debug)]
pub struct StreamInfo<'a, T> {
    pub element: &'a T,
    /// Stream-Position des Elementanfangs (bzw. -endes bei Gegenrichtung)
    pub s_offset: f64,
    pub in_stream_direction: bool,
}

impl<T> Clone for StreamInfo<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StreamInfo<'_, T> {}

impl<'a, T: StreamElement> StreamInfo<'a, T> {
    pub fn new(element: &'a T, s_offset: f64, in_stream_direction: bool) -> Self {
        Self {
            element,
            s_offset,
            in_stream_direction,
        }
    }

    /// Rechnet eine elementlokale Koordinate in die Stream-Position um.
    pub fn stream_position(&self, element_position: f64) -> f64 {
        if self.in_stream_direction {
            self.s_offset + element_position
        } else {
            self.s_offset - element_position
        }
    }

    pub fn start_s(&self) -> f64 {
        if self.in_stream_direction {
            self.s_offset
        } else {
            self.s_offset - self.element.length()
        }
    }

    pub fn end_s(&self) -> f64 {
        if self.in_stream_direction {
            self.s_offset + self.element.length()
        } else {
            self.s_offset
        }
    }

    /// Elementlokale Koordinate zu einer Stream-Position.
    fn element_position(&self, stream_position: f64) -> f64 {
        if self.in_stream_direction {
            stream_position - self.s_offset
        } else {
            self.s_offset - stream_position
        }
    }
}

/// Geordnete Folge von Elementen mit durchgehender Längskoordinate.
#[derive(Debug)]
pub struct Stream<'a, T> {
    elements: Vec<StreamInfo<'a, T>>,
}

impl<T> Clone for Stream<'_, T> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
        }
    }
}

impl<T> Default for Stream<'_, T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

pub type LaneStream<'a> = Stream<'a, Lane>;
pub type RoadStream<'a> = Stream<'a, Road>;

impl<'a, T: StreamElement> Stream<'a, T> {
    pub fn new(elements: Vec<StreamInfo<'a, T>>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[StreamInfo<'a, T>] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn first(&self) -> Option<&StreamInfo<'a, T>> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&StreamInfo<'a, T>> {
        self.elements.last()
    }

    /// Umgekehrter Stream: Elemente von hinten nach vorne, Richtung invertiert.
    pub fn reverse(&self) -> Self {
        let mut current = 0.0;
        let elements = self
            .elements
            .iter()
            .rev()
            .map(|info| {
                let in_stream_direction = !info.in_stream_direction;
                let length = info.element.length();
                let s_offset = if in_stream_direction {
                    current
                } else {
                    current + length
                };
                current += length;
                StreamInfo::new(info.element, s_offset, in_stream_direction)
            })
            .collect();
        Self { elements }
    }

    fn info_of(&self, element: &T) -> Option<&StreamInfo<'a, T>> {
        let id = element.id();
        self.elements.iter().find(|info| info.element.id() == id)
    }

    /// Stream-Position zur straßenbezogenen Koordinate `s` auf `element`.
    pub fn position_by_element_and_s(&self, element: &T, s: f64) -> Option<f64> {
        self.info_of(element)
            .map(|info| info.stream_position(s - info.element.start_distance()))
    }

    /// Erstes Element, das `position` enthält, samt elementlokaler Koordinate.
    pub fn element_and_s_by_position(&self, position: f64) -> Option<(f64, &'a T)> {
        self.elements
            .iter()
            .find(|info| info.start_s() <= position && position <= info.end_s())
            .map(|info| (info.element_position(position), info.element))
    }

    pub fn contains(&self, element: &T) -> bool {
        self.info_of(element).is_some()
    }
}
