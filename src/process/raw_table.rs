/// One survey response as read from the export. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based data row in the source file (the header is row 0).
    pub row: usize,
    /// Trimmed cells, aligned with [`RawTable::headers`]. Short rows are padded
    /// with empty cells.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names exactly as the export wrote them (BOM stripped).
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cell `col` of every record, in row order.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &str> + '_ {
        self.records
            .iter()
            .map(move |r| r.cells.get(col).map(String::as_str).unwrap_or(""))
    }

    /// Value of `raw_name` in `record`, if the export carries that header.
    pub fn get<'a>(&self, record: &'a RawRecord, raw_name: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == raw_name)?;
        record.cells.get(idx).map(String::as_str)
    }
}
