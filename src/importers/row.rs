use crate::importers::monzo_csv::ReadError;

/// The raw fields of one CSV line, in column order.
#[derive(Clone, Debug)]
pub struct Row {
    line: u64,
    fields: csv::StringRecord,
}

impl Row {
    pub fn new(line: u64, fields: csv::StringRecord) -> Self {
        Self { line, fields }
    }

    /// Line number in the source file (1-based, counting the header).
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the field at `index`. A short row is an error.
    pub fn field(&self, index: usize) -> Result<&str, ReadError> {
        self.fields.get(index).ok_or(ReadError::MissingField {
            line: self.line,
            index,
            len: self.fields.len(),
        })
    }
}

impl<'a> FromIterator<&'a str> for Row {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Row::new(0, iter.into_iter().collect())
    }
}
