//! Four-line numeric readout shown under the calculator prompt.

/// Signed, unsigned, binary and grouped-hex renderings of one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub signed: String,
    pub unsigned: String,
    pub binary: String,
    pub hex: String,
}

impl Readout {
    /// Render `value`; `None` (an evaluation failure) renders as zero.
    pub fn new(value: Option<i64>) -> Self {
        let value = value.unwrap_or(0);
        let bits = value.cast_unsigned();
        Self {
            signed: format!("Sig:{value}"),
            unsigned: format!("Uns:{bits}"),
            binary: format!("Bin:{bits:064b}"),
            hex: format!("Hex:{:08x}`{:08x}", bits >> 32, bits & 0xffff_ffff),
        }
    }

    pub fn lines(&self) -> [&str; 4] {
        [&self.signed, &self.unsigned, &self.binary, &self.hex]
    }
}
