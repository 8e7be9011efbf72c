// Topics: group taxonomy paths by weight and map nodes to the sentences
// that mention them.

pub mod distribution;
pub mod map;
