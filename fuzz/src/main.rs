use afl::fuzz;
use sqiv::QoiDecoder;
use std::io::Cursor;

fn main() {
    fuzz!(|data: &[u8]| {
        let mut decoder = QoiDecoder::new(Cursor::new(data));
        let _ = decoder.decode();
    });
}
