use crate::parser::DisclosureTable;

/// Returns a copy of `table` without the columns named in `drop`.
///
/// Names not present in the header are ignored. Remaining columns keep their
/// relative order.
pub fn prune_columns<S: AsRef<str>>(table: &DisclosureTable, drop: &[S]) -> DisclosureTable {
    let keep: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !drop.iter().any(|d| d.as_ref() == h.as_str()))
        .map(|(i, _)| i)
        .collect();

    let headers = keep.iter().map(|&i| table.headers[i].clone()).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| keep.iter().map(|&i| row.get(i).unwrap_or("")).collect())
        .collect();

    DisclosureTable { headers, rows }
}
