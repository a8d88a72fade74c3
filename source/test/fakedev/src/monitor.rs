use crate::Error;
use common::{
    protocol::{is_banner_line, parse_record, LineDecoder, BANNER},
    values::RawSample,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    /// Both banner lines were received.
    Banner,
    Record(RawSample),
}

/// Host side of the serial stream: checks the banner, then decodes records.
#[derive(Default)]
pub struct Monitor {
    decoder: LineDecoder,
    banner_lines: usize,
    records: usize,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn push(&mut self, byte: u8) -> Result<Option<Event>, Error> {
        let line = match self.decoder.push(byte) {
            None => return Ok(None),
            Some(line) => line?,
        };
        if self.banner_lines < BANNER.len() {
            if !is_banner_line(self.banner_lines, line) {
                return Err(Error::Banner {
                    index: self.banner_lines,
                    got: line.to_owned(),
                });
            }
            self.banner_lines += 1;
            return Ok((self.banner_lines == BANNER.len()).then_some(Event::Banner));
        }
        let sample = parse_record(line)?;
        self.records += 1;
        Ok(Some(Event::Record(sample)))
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<Event>, Error> {
        let mut events = Vec::new();
        for &b in bytes {
            if let Some(event) = self.push(b)? {
                events.push(event);
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::protocol::ParseError;

    const BANNER_TEXT: &[u8] =
        b"Capacitive Soil Moisture Sensor Test (AVR C)\r\n--------------------------------------------\r\n";

    #[test]
    fn banner_then_records() {
        let mut monitor = Monitor::new();
        assert_eq!(monitor.feed(BANNER_TEXT).unwrap(), vec![Event::Banner]);
        let events = monitor
            .feed(b"Raw Sensor Value: 0\r\nRaw Sensor Value: 1023\r\nRaw Sen")
            .unwrap();
        assert_eq!(
            events,
            vec![
                Event::Record(RawSample::MIN),
                Event::Record(RawSample::MAX),
            ]
        );
        assert_eq!(monitor.records(), 2);
    }

    #[test]
    fn record_before_banner() {
        let mut monitor = Monitor::new();
        match monitor.feed(b"Raw Sensor Value: 5\r\n") {
            Err(Error::Banner { index: 0, got }) => assert_eq!(got, "Raw Sensor Value: 5"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn garbage_record() {
        let mut monitor = Monitor::new();
        monitor.feed(BANNER_TEXT).unwrap();
        assert!(matches!(
            monitor.feed(b"Raw Sensor Value: 12x\r\n"),
            Err(Error::Parse(ParseError::InvalidNumber))
        ));
    }
}
