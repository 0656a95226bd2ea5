//! Built-in unit vocabulary for produce orders.

use super::UnitDefinition;

/// Default vocabulary used when no stored vocabulary is available.
#[must_use]
pub fn builtin_units() -> Vec<UnitDefinition> {
    let mut units = Vec::new();
    units.extend(weight_units());
    units.extend(count_units());
    units.extend(container_units());
    units.extend(bundle_units());
    units
}

fn weight_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::new("kilo").with_variations(&[
            "kilos",
            "kg",
            "kgs",
            "k",
            "kl",
            "kls",
            "kilogramo",
            "kilogramos",
            "kilito",
            "kilitos",
        ]),
        UnitDefinition::new("gramo").with_variations(&["gramos", "g", "gr", "grs", "grm", "grms"]),
        UnitDefinition::new("libra").with_variations(&["libras", "lb", "lbs"]),
        UnitDefinition::new("litro").with_variations(&["litros", "l", "lt", "lts"]),
    ]
}

fn count_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::new("unidad").with_variations(&[
            "unidades", "u", "ud", "uds", "und", "unds", "unid", "pieza", "piezas",
        ]),
        UnitDefinition::new("docena").with_variations(&["docenas", "doc"]),
        UnitDefinition::new("cabeza").with_variations(&["cabezas"]),
    ]
}

fn container_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::new("caja").with_variations(&["cajas", "cj", "cja", "cajita", "cajitas"]),
        UnitDefinition::new("cajón")
            .with_variations(&["cajon", "cajones"])
            .with_plural("cajones"),
        UnitDefinition::new("bolsa").with_variations(&["bolsas", "bolsita", "bolsitas", "bls"]),
        UnitDefinition::new("paquete").with_variations(&["paquetes", "paq", "pqt"]),
        UnitDefinition::new("bandeja").with_variations(&["bandejas"]),
        UnitDefinition::new("maple").with_variations(&["maples"]),
        UnitDefinition::new("bulto").with_variations(&["bultos"]),
        UnitDefinition::new("saco").with_variations(&["sacos"]),
    ]
}

fn bundle_units() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::new("atado").with_variations(&["atados", "atadito", "ataditos"]),
        UnitDefinition::new("manojo").with_variations(&["manojos"]),
        UnitDefinition::new("racimo").with_variations(&["racimos"]),
        UnitDefinition::new("haz").with_variations(&["haces"]),
    ]
}
