/// Recognized material names, in display order.
///
/// Only pre-populates the client filter; points may declare any material.
pub const MATERIAL_CATALOG: &[&str] = &[
    "Lixo eletrônico",
    "Óleo de cozinha",
    "Vidro",
    "Plástico",
    "Papel",
    "Metal",
    "Orgânico",
    "Baterias/Pilhas",
    "Roupas/Calçados",
];
