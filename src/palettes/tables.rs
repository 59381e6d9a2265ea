//! Color tables for the named palettes. Continuous maps carry their
//! 11-color variants; Category10 and Dark2 are listed at their natural size.

pub(super) const MAGMA_11: [&str; 11] = [
    "#000004", "#140e36", "#3b0f70", "#641a80", "#8c2981", "#b73779", "#de4968", "#f7705c",
    "#fe9f6d", "#fecf92", "#fcfdbf",
];

pub(super) const INFERNO_11: [&str; 11] = [
    "#000004", "#160b39", "#420a68", "#6a176e", "#932667", "#bc3754", "#dd513a", "#f37819",
    "#fca50a", "#f6d746", "#fcffa4",
];

pub(super) const PLASMA_11: [&str; 11] = [
    "#0d0887", "#41049d", "#6a00a8", "#8f0da4", "#b12a90", "#cc4778", "#e16462", "#f2844b",
    "#fca636", "#fcce25", "#f0f921",
];

pub(super) const VIRIDIS_11: [&str; 11] = [
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#dce319", "#fde725",
];

pub(super) const CIVIDIS_11: [&str; 11] = [
    "#00224e", "#123570", "#3b496c", "#575d6d", "#707173", "#8a8678", "#a59c74", "#c3b369",
    "#e1cc55", "#fee838", "#ffea46",
];

pub(super) const TURBO_11: [&str; 11] = [
    "#30123b", "#4145ab", "#4675ed", "#39a2fc", "#1bcfd4", "#24eca6", "#61fc6c", "#a4fc3b",
    "#d1e834", "#fe9b2d", "#7a0403",
];

pub(super) const CATEGORY10_10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub(super) const DARK2_8: [&str; 8] = [
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];
