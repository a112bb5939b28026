//! CSV output: one header row and one value row per log.
//!
//! Columns are `mean_iou`, `pixel_wise_accuracy`, then one column per
//! class line in document order. Class names are not deduplicated.
//! Rows end in `\r\n`.

use crate::extract::IouRecord;
use std::io;
use std::path::Path;

/// Header and value rows, in column order.
pub fn build_rows(
    records: &[IouRecord],
    mean_iou: f64,
    pixel_wise_accuracy: f64,
) -> (Vec<String>, Vec<String>) {
    let mut header = vec!["mean_iou".to_string(), "pixel_wise_accuracy".to_string()];
    let mut values = vec![format_value(mean_iou), format_value(pixel_wise_accuracy)];
    for record in records {
        header.push(record.class_name.clone());
        values.push(format_value(record.iou));
    }
    (header, values)
}

/// Shortest round-trip form, but whole numbers keep one decimal (`80.0`, not `80`).
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Write the two-row CSV to `path`, replacing any existing file.
///
/// Rows are encoded into a temp file next to `path` and renamed over it, so
/// a failure part-way leaves the previous file (if any) intact.
pub fn write_csv(
    path: &Path,
    records: &[IouRecord],
    mean_iou: f64,
    pixel_wise_accuracy: f64,
) -> io::Result<()> {
    let (header, values) = build_rows(records, mean_iou, pixel_wise_accuracy);

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let existing = std::fs::metadata(path).ok().map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".pspnet-csv-").suffix(".tmp");
    #[cfg(unix)]
    {
        // NamedTempFile defaults to 0600; open with 0666 so the umask decides, like File::create.
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(tmp);
    writer.write_record(&header)?;
    writer.write_record(&values)?;
    let tmp = writer.into_inner().map_err(|e| e.into_error())?;

    tmp.persist(path).map_err(|e| e.error)?;
    tracing::debug!(
        path = %path.display(),
        columns = header.len(),
        "wrote csv"
    );
    Ok(())
}
