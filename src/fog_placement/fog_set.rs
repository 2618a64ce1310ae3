use crate::dsa::bitset::BitSet;

// grow only, the cloud is a member from construction on
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct FogSet {
    members:BitSet,
    cloud:usize,
}

impl FogSet {
    pub fn anchored(len:usize,cloud:usize) -> Self {
        debug_assert!(cloud < len);
        let mut members = BitSet::filled(len, false);
        members.store_at(cloud, true);
        Self {members,cloud}
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn cloud(&self) -> usize {
        self.cloud
    }
    pub fn contains(&self,node:usize) -> bool {
        self.members.get_at(node).unwrap_or(false)
    }
    pub fn promote(&mut self,node:usize) -> bool {
        if self.contains(node) {
            return false;
        }
        self.members.store_at(node, true).is_some()
    }
    // re-asserts the anchor, called on every exit path of a solve
    pub(crate) fn pin_cloud(&mut self) {
        self.members.store_at(self.cloud, true);
    }
    pub fn count(&self) -> usize {
        self.members.count_ones()
    }
    // ascending index order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter_ones()
    }
    pub fn as_bits(&self) -> &BitSet {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::FogSet;

    #[test]
    fn test_anchor_and_growth() {
        let mut fogs = FogSet::anchored(10, 7);
        assert!(fogs.contains(7));
        assert_eq!(fogs.count(),1);
        assert!(fogs.promote(2));
        assert!(!fogs.promote(2));
        assert!(!fogs.promote(7));
        assert!(!fogs.promote(10));
        assert_eq!(fogs.iter().collect::<Vec<_>>(),vec![2,7]);
        fogs.pin_cloud();
        assert_eq!(fogs.count(),2);
    }
}
