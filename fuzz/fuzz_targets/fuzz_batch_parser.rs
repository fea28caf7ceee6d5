#![no_main]

use libfuzzer_sys::fuzz_target;
use pstat_ingest::batch::BatchParser;
use pstat_ingest::peak::find_peak;

fuzz_target!(|data: &[u8]| {
    // Uploads arrive as text; anything that is not UTF-8 never reaches the parser
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    for delimiter in [b',', b';', b'\t'] {
        let (batch, report) = BatchParser::new(delimiter).parse_with_report(raw);

        assert_eq!(batch.len(), report.rows_accepted);
        assert_eq!(batch.currents().len(), batch.voltages().len());
        assert_eq!(batch.currents().len(), batch.elapsed_ms().len());

        match find_peak(batch.currents()) {
            Ok(peak) => assert!(peak.index < batch.len()),
            Err(_) => assert!(batch.is_empty()),
        }
    }
});
