use strum::IntoEnumIterator;

use crate::{configuration::Configuration, FormError};

/// The inputs of the configuration form, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Field {
    #[default]
    #[strum(to_string = "Total Tickets")]
    TotalTickets,
    #[strum(to_string = "Ticket Release Rate (ms)")]
    TicketReleaseRate,
    #[strum(to_string = "Customer Retrieval Rate (ms)")]
    CustomerRetrievalRate,
    #[strum(to_string = "Max Ticket Capacity")]
    MaxTicketCapacity,
}

impl Field {
    fn index(self) -> usize {
        self as usize
    }

    fn next(self) -> Self {
        Field::iter().cycle().nth(self.index() + 1).unwrap_or(self)
    }

    fn previous(self) -> Self {
        let count = Field::iter().count();
        Field::iter()
            .nth((self.index() + count - 1) % count)
            .unwrap_or(self)
    }
}

/// Editable state of the four numeric inputs.
///
/// Only digits can be typed, so the form behaves like a numeric input:
/// a field is either empty or holds a run of digits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigForm {
    values: [String; 4],
    focus: Field,
}

impl ConfigForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn focused(&self) -> Field {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Types a character into the focused field. Non-digits are ignored.
    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.values[self.focus.index()].push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.values[self.focus.index()].pop();
    }

    /// Empties every field and puts the focus back on the first one.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Builds a [`Configuration`] from the current inputs. The first field that
    /// is empty, not a number, or zero is reported.
    pub fn parse(&self) -> Result<Configuration, FormError> {
        Ok(Configuration {
            total_tickets: self.parse_field(Field::TotalTickets)?,
            ticket_release_rate_ms: self.parse_field(Field::TicketReleaseRate)?,
            customer_retrieval_rate_ms: self.parse_field(Field::CustomerRetrievalRate)?,
            max_ticket_capacity: self.parse_field(Field::MaxTicketCapacity)?,
        })
    }

    fn parse_field(&self, field: Field) -> Result<u32, FormError> {
        let value = self.value(field).trim();
        if value.is_empty() {
            return Err(FormError::Missing(field));
        }
        match value.parse::<u32>() {
            Ok(0) => Err(FormError::NotPositive(field)),
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(FormError::NotANumber(field)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: [&str; 4]) -> ConfigForm {
        let mut form = ConfigForm::new();
        for (field, value) in Field::iter().zip(values) {
            form.set_value(field, value);
        }
        form
    }

    #[test]
    fn parses_complete_form() {
        let form = filled(["100", "200", "300", "150"]);
        let config = form.parse().unwrap();
        assert_eq!(config.total_tickets, 100);
        assert_eq!(config.ticket_release_rate_ms, 200);
        assert_eq!(config.customer_retrieval_rate_ms, 300);
        assert_eq!(config.max_ticket_capacity, 150);
    }

    #[test]
    fn reports_first_invalid_field() {
        let form = filled(["100", "", "abc", "150"]);
        assert_eq!(form.parse(), Err(FormError::Missing(Field::TicketReleaseRate)));

        let form = filled(["100", "5", "abc", "150"]);
        assert_eq!(
            form.parse(),
            Err(FormError::NotANumber(Field::CustomerRetrievalRate))
        );

        let form = filled(["0", "5", "5", "5"]);
        assert_eq!(form.parse(), Err(FormError::NotPositive(Field::TotalTickets)));

        let form = filled(["99999999999", "5", "5", "5"]);
        assert_eq!(form.parse(), Err(FormError::NotANumber(Field::TotalTickets)));
    }

    #[test]
    fn typing_only_accepts_digits() {
        let mut form = ConfigForm::new();
        for c in "1a2-3".chars() {
            form.push_char(c);
        }
        assert_eq!(form.value(Field::TotalTickets), "123");
        form.pop_char();
        assert_eq!(form.value(Field::TotalTickets), "12");
    }

    #[test]
    fn focus_wraps_around() {
        let mut form = ConfigForm::new();
        form.focus_previous();
        assert_eq!(form.focused(), Field::MaxTicketCapacity);
        form.focus_next();
        assert_eq!(form.focused(), Field::TotalTickets);
        form.focus_next();
        form.push_char('7');
        assert_eq!(form.value(Field::TicketReleaseRate), "7");
    }

    #[test]
    fn clear_resets_values_and_focus() {
        let mut form = filled(["1", "2", "3", "4"]);
        form.focus_next();
        form.clear();
        for field in Field::iter() {
            assert_eq!(form.value(field), "");
        }
        assert_eq!(form.focused(), Field::TotalTickets);
    }
}
