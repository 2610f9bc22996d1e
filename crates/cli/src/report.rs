use reflow_chunks::ChunkList;
use reflow_cleanup::CleanupReport;

/// One line per chunk: position, level, kind, parent kind, text, flags
pub fn render_text(list: &ChunkList, cleanup: Option<&CleanupReport>) -> String {
    let mut out = String::new();
    for (_, chunk) in list {
        out.push_str(&format!(
            "{:>4}:{:<3} [{}] {:<16} {:<16} {:?} {}\n",
            chunk.orig.line,
            chunk.orig.column,
            chunk.level,
            chunk.kind().as_str(),
            chunk.parent_kind().as_str(),
            chunk.text(),
            chunk.flags(),
        ));
    }

    if let Some(report) = cleanup {
        out.push_str(&format!("# cleanup: {report}\n"));
    }
    for record in list.provenance().records() {
        out.push_str(&format!("# {record}\n"));
    }
    out
}
