use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, ContainerLen, Deser, S11nError, Ser};
use anyhow::Result;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::mem;

/* References */

impl<T: Ser + ?Sized> Ser for &T {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        (**self).ser(os)
    }
}

impl<T: Ser + ?Sized> Ser for Box<T> {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        (**self).ser(os)
    }
}

impl<T: Deser> Deser for Box<T> {
    const MIN_WIRE_LEN: usize = T::MIN_WIRE_LEN;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        Ok(Box::new(T::deser(is)?))
    }
}

/* Sequences */

impl<T: Ser> Ser for [T] {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        T::ser_seq(self, os)
    }
}

impl<T: Ser> Ser for Vec<T> {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        T::ser_seq(self, os)
    }
}

impl<T: Deser> Deser for Vec<T> {
    const MIN_WIRE_LEN: usize = mem::size_of::<u32>();
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        T::deser_seq(is)
    }
}

/// Fixed arrays carry no count; both ends know `N`.
impl<T: Ser, const N: usize> Ser for [T; N] {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        for item in self {
            item.ser(os)?;
        }
        Ok(())
    }
}

impl<T: Deser + Default + Copy, const N: usize> Deser for [T; N] {
    const MIN_WIRE_LEN: usize = T::MIN_WIRE_LEN * N;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let mut arr = [T::default(); N];
        for slot in arr.iter_mut() {
            *slot = T::deser(is)?;
        }
        Ok(arr)
    }
}

impl<A: Ser, B: Ser> Ser for (A, B) {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.0.ser(os)?;
        self.1.ser(os)
    }
}

impl<A: Deser, B: Deser> Deser for (A, B) {
    const MIN_WIRE_LEN: usize = A::MIN_WIRE_LEN + B::MIN_WIRE_LEN;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let a = A::deser(is)?;
        let b = B::deser(is)?;
        Ok((a, b))
    }
}

/* Maps */

/// Writes the entries ordered by the bytes of each encoded key,
/// so that the output never depends on the map's own iteration order.
fn ser_map_entries<'a, K, V>(
    entries: impl ExactSizeIterator<Item = (&'a K, &'a V)>,
    os: &mut ByteMemoryOutStream,
) -> Result<()>
where
    K: Ser + 'a,
    V: Ser + 'a,
{
    ContainerLen::from_len(entries.len())?.ser(os)?;

    let keyed = entries
        .map(|(k, v)| k.ser_solo().map(|k_buf| (k_buf, v)))
        .collect::<Result<Vec<_>>>()?;
    for (k_buf, v) in keyed
        .into_iter()
        .sorted_unstable_by(|(k_a, _), (k_b, _)| k_a.cmp(k_b))
    {
        os.put_bytes(&k_buf);
        v.ser(os)?;
    }
    Ok(())
}

/// `insert` returns false if the key was already present.
fn deser_map_entries<K, V>(
    is: &mut ByteMemoryInStream<'_>,
    mut insert: impl FnMut(K, V) -> bool,
) -> Result<()>
where
    K: Deser,
    V: Deser,
{
    let count = ContainerLen::deser(is)?.as_usize();
    is.ensure(count.saturating_mul(K::MIN_WIRE_LEN + V::MIN_WIRE_LEN))?;

    for _ in 0..count {
        let k = K::deser(is)?;
        let v = V::deser(is)?;
        if !insert(k, v) {
            return Err(S11nError::DuplicateMapKey.into());
        }
    }
    Ok(())
}

impl<K: Ser, V: Ser> Ser for BTreeMap<K, V> {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        ser_map_entries(self.iter(), os)
    }
}

impl<K: Deser + Ord, V: Deser> Deser for BTreeMap<K, V> {
    const MIN_WIRE_LEN: usize = mem::size_of::<u32>();
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let mut map = BTreeMap::new();
        deser_map_entries(is, |k, v| map.insert(k, v).is_none())?;
        Ok(map)
    }
}

impl<K: Ser, V: Ser, S> Ser for HashMap<K, V, S> {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        ser_map_entries(self.iter(), os)
    }
}

impl<K, V, S> Deser for HashMap<K, V, S>
where
    K: Deser + Eq + Hash,
    V: Deser,
    S: BuildHasher + Default,
{
    const MIN_WIRE_LEN: usize = mem::size_of::<u32>();
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let mut map = HashMap::with_hasher(S::default());
        deser_map_entries(is, |k, v| map.insert(k, v).is_none())?;
        Ok(map)
    }
}
