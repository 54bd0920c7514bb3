use crate::models::Waterway;

/// The `n` largest waterway shapes by area. Equal areas keep their file order.
pub fn largest_waterways(waterways: &[Waterway], n: usize) -> Vec<Waterway> {
    let mut ranked = waterways.to_vec();
    ranked.sort_by(|a, b| b.area.total_cmp(&a.area));
    ranked.truncate(n);
    ranked
}
