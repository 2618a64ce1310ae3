// packed bit vector, bit i lives in bytes[i/8] at position i%8
#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub struct BitSet {
    size:usize,
    bytes:Vec<u8>
}

impl Default for BitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSet {
    pub fn new() -> Self {
        Self {size:0,bytes:vec![]}
    }
    pub fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {return Self::new()}
        let vec_capacity = capacity/8 + 1;
        Self {
            size:0,
            bytes:Vec::with_capacity(vec_capacity)
        }
    }
    // fixed length set with every bit equal to `bit`
    pub fn filled(len:usize,bit:bool) -> Self {
        let mut set = Self::with_capacity(len);
        for _ in 0..len {set.push_bit(bit);}
        set
    }
    pub fn len(&self) -> usize {
        self.size
    }
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
    pub fn push_bit(&mut self, bit:bool) {
        let byte_pos = self.size / 8;
        let pos_in_byte = self.size % 8;

        debug_assert!(byte_pos <= self.bytes.len());

        if byte_pos == self.bytes.len() {
            self.bytes.push(0);
        }
        let mask = 1u8 << pos_in_byte;
        if bit {
            self.bytes[byte_pos] |= mask;
        }else{
            self.bytes[byte_pos] &= !mask;
        }
        self.size += 1;
    }
    pub fn get_at(&self,index:usize) -> Option<bool> {
        if index >= self.size {return None}
        let byte_pos = index / 8;
        let pos_in_byte = index % 8;
        let byte = self.bytes.get(byte_pos)?;
        let mask = 1u8 << pos_in_byte;
        Some(*byte & mask > 0)
    }
    pub fn store_at(&mut self,index:usize,bit:bool) -> Option<()> {
        if index >= self.size {return None}
        let byte_pos = index / 8;
        let pos_in_byte = index % 8;
        let byte = self.bytes.get_mut(byte_pos)?;
        let mask = 1u8 << pos_in_byte;
        if bit {
            *byte |= mask;
        }else{
            *byte &= !mask;
        }
        Some(())
    }
    // bits past `size` in the last byte are always zero, so whole bytes can be counted
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }
    pub fn all(&self) -> bool {
        self.count_ones() == self.size
    }
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(|i| self.get_at(i).unwrap_or(false))
    }
    // indices of set bits in ascending order
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().enumerate().filter_map(|(i,bit)| bit.then_some(i))
    }
}

impl FromIterator<bool> for BitSet {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for bit in iter {
            set.push_bit(bit);
        }
        set
    }
}

#[cfg(test)]
mod tests{
    use rand::Rng;

    use super::BitSet;
    #[test]
    fn test_create() {
        BitSet::new();
        let mut set = BitSet::with_capacity(114514);
        for _ in 0..114514 {set.push_bit(true);}
        assert!(set.get_at(10000).unwrap());
        assert!(set.get_at(114513).unwrap());
        assert!(set.get_at(114514).is_none());
        let bit = false;
        set.store_at(1145, bit).unwrap();
        assert_eq!(set.get_at(1145).unwrap(),bit);
        assert_eq!(set.count_ones(),114513);
    }
    #[test]
    fn test_count_matches_bits() {
        let mut rng = rand::rng();
        let len:usize = rng.random_range(1..2000);
        let bits:Vec<bool> = (0..len).map(|_| rng.random_bool(0.3)).collect();
        let set:BitSet = bits.iter().copied().collect();
        assert_eq!(set.len(),len);
        assert_eq!(set.count_ones(),bits.iter().filter(|b| **b).count());
        let ones:Vec<usize> = set.iter_ones().collect();
        let expected:Vec<usize> = bits.iter().enumerate().filter(|(_,b)| **b).map(|(i,_)| i).collect();
        assert_eq!(ones,expected);
    }
    #[test]
    fn test_filled() {
        let set = BitSet::filled(13, true);
        assert!(set.all());
        let mut set = BitSet::filled(13, false);
        assert!(!set.all());
        assert_eq!(set.count_ones(),0);
        set.store_at(12, true).unwrap();
        assert_eq!(set.iter_ones().collect::<Vec<_>>(),vec![12]);
        assert!(BitSet::new().all());
    }
}
