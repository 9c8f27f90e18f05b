use std::fmt;

/// A measurement carried by one payload word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CapacityAh,
    SocPct,
    Unknown2,
    Unknown3,
    Status1,
    CurrentA,
    VoltageV,
    Flags,
    Status2,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::CapacityAh => write!(f, "capacityAh"),
            Field::SocPct => write!(f, "socPct"),
            Field::Unknown2 => write!(f, "unknown2"),
            Field::Unknown3 => write!(f, "unknown3"),
            Field::Status1 => write!(f, "status1"),
            Field::CurrentA => write!(f, "currentA"),
            Field::VoltageV => write!(f, "voltageV"),
            Field::Flags => write!(f, "flags"),
            Field::Status2 => write!(f, "status2"),
        }
    }
}

/// Negates a field when `mask` is set in the word of `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignBit {
    pub source: Field,
    pub mask: u16,
}

/// Position and scaling of one field inside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordField {
    /// Word offset in the payload.
    pub index: usize,
    pub field: Field,
    /// Raw word is divided by this value; `1` keeps the integer.
    pub divisor: u16,
    /// Number of decoded words required before the field is populated. Never less than
    /// `index + 1`, but may be more when fields are only meaningful together.
    pub min_words: usize,
    pub sign: Option<SignBit>,
}

impl WordField {
    const fn plain(index: usize, field: Field) -> Self {
        Self {
            index,
            field,
            divisor: 1,
            min_words: index + 1,
            sign: None,
        }
    }

    /// Raw word for this field, if enough words were decoded.
    pub fn read(&self, words: &[u16]) -> Option<u16> {
        if words.len() < self.min_words.max(self.index + 1) {
            return None;
        }
        words.get(self.index).copied()
    }

    pub fn is_scaled(&self) -> bool {
        self.divisor != 1
    }
}

/// Frame constants and word table of one frame version.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameLayout {
    pub name: &'static str,
    pub header: u8,
    pub opcode: u8,
    pub fields: &'static [WordField],
}

impl FrameLayout {
    pub fn field(&self, field: Field) -> Option<&WordField> {
        self.fields.iter().find(|f| f.field == field)
    }
}

// Current and voltage are only reported together, hence the shared min_words of 7
const TITAN_FIELDS: [WordField; 9] = [
    WordField::plain(0, Field::CapacityAh),
    WordField::plain(1, Field::SocPct),
    WordField::plain(2, Field::Unknown2),
    WordField::plain(3, Field::Unknown3),
    WordField::plain(4, Field::Status1),
    WordField {
        index: 5,
        field: Field::CurrentA,
        divisor: 100,
        min_words: 7,
        // set while discharging
        sign: Some(SignBit {
            source: Field::Flags,
            mask: 0x80,
        }),
    },
    WordField {
        index: 6,
        field: Field::VoltageV,
        divisor: 10,
        min_words: 7,
        sign: None,
    },
    WordField::plain(7, Field::Flags),
    WordField::plain(8, Field::Status2),
];

pub static TITAN: FrameLayout = FrameLayout {
    name: "titan",
    header: 0x01,
    opcode: 0x03,
    fields: &TITAN_FIELDS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titan_table_is_ordered_and_unique() {
        for (i, entry) in TITAN.fields.iter().enumerate() {
            assert_eq!(entry.index, i);
            assert!(entry.min_words > entry.index);
            assert_eq!(TITAN.field(entry.field), Some(entry));
        }
    }

    #[test]
    fn current_and_voltage_need_seven_words() {
        let current = TITAN.field(Field::CurrentA).unwrap();
        let voltage = TITAN.field(Field::VoltageV).unwrap();
        let six = [0u16; 6];
        assert_eq!(current.read(&six), None);
        assert_eq!(voltage.read(&six), None);
        let seven = [0, 0, 0, 0, 0, 0x0c0d, 0x010a];
        assert_eq!(current.read(&seven), Some(0x0c0d));
        assert_eq!(voltage.read(&seven), Some(0x010a));
    }

    #[test]
    fn plain_field_reads_its_word() {
        let soc = TITAN.field(Field::SocPct).unwrap();
        assert_eq!(soc.read(&[0x01a0]), None);
        assert_eq!(soc.read(&[0x01a0, 0x0033]), Some(51));
        assert!(!soc.is_scaled());
    }
}
