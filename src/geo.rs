// Coordinate lookup and flow-line geometry for the map renderer.
use crate::flows::FlowView;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// `[lat, lng]` in degrees.
pub type LatLng = [f64; 2];

static DOMESTIC: Lazy<HashMap<&'static str, LatLng>> = Lazy::new(|| {
    HashMap::from([
        ("JAMMU & KASHMIR", [34.0837, 74.7973]),
        ("HIMACHAL PRADESH", [31.1048, 77.1734]),
        ("PUNJAB", [30.7333, 76.7794]),
        ("CHANDIGARH", [30.7333, 76.7794]),
        ("UTTARAKHAND", [30.3165, 78.0322]),
        ("HARYANA", [29.0588, 76.0856]),
        ("NCT OF DELHI", [28.6139, 77.2090]),
        ("RAJASTHAN", [26.9124, 75.7873]),
        ("UTTAR PRADESH", [26.8467, 80.9462]),
        ("BIHAR", [25.5941, 85.1376]),
        ("SIKKIM", [27.3314, 88.6138]),
        ("ARUNACHAL PRADESH", [27.0844, 93.6053]),
        ("NAGALAND", [25.6701, 94.1077]),
        ("MANIPUR", [24.8170, 93.9368]),
        ("MIZORAM", [23.7271, 92.7176]),
        ("TRIPURA", [23.8315, 91.2868]),
        ("MEGHALAYA", [25.5788, 91.8933]),
        ("ASSAM", [26.1158, 91.7086]),
        ("WEST BENGAL", [22.5726, 88.3639]),
        ("JHARKHAND", [23.3441, 85.3096]),
        ("ODISHA", [20.2961, 85.8245]),
        ("CHHATTISGARH", [21.2514, 81.6296]),
        ("MADHYA PRADESH", [23.2599, 77.4126]),
        ("GUJARAT", [23.0225, 72.5714]),
        ("DAMAN & DIU", [20.4283, 72.8397]),
        ("DADRA & NAGAR HAVELI", [20.2762, 73.0083]),
        ("MAHARASHTRA", [19.7515, 75.7139]),
        ("GOA", [15.4909, 73.8278]),
        ("ANDHRA PRADESH", [15.9129, 79.7400]),
        ("KARNATAKA", [15.3173, 75.7139]),
        ("LAKSHADWEEP", [10.5667, 72.6417]),
        ("KERALA", [10.8505, 76.2711]),
        ("TAMIL NADU", [11.1271, 78.6569]),
        ("PUDUCHERRY", [11.9416, 79.8083]),
        ("ANDAMAN & NICOBAR ISLANDS", [11.6234, 92.7265]),
        ("TELANGANA", [18.1124, 79.0193]),
    ])
});

// Spellings follow the census birthplace column, not ISO names.
static INTERNATIONAL: Lazy<HashMap<&'static str, LatLng>> = Lazy::new(|| {
    HashMap::from([
        ("NEPAL", [28.3949, 84.1240]),
        ("BANGLADESH", [23.6850, 90.3563]),
        ("PAKISTAN", [30.3753, 69.3451]),
        ("SRI LANKA", [7.8731, 80.7718]),
        ("BHUTAN", [27.5142, 90.4336]),
        ("AFGANISTAN", [33.9391, 67.7100]),
        ("MAYANMAR", [19.7633, 96.0785]),
        ("MALDIVES", [3.2028, 73.2207]),
        ("CHINA", [35.8617, 104.1954]),
        ("JAPAN", [36.2048, 138.2529]),
        ("INDONESIA", [-0.7893, 113.9213]),
        ("MALAYSIA", [4.2105, 101.9758]),
        ("SINGAPORE", [1.3521, 103.8198]),
        ("VIETNAM", [14.0583, 108.2772]),
        ("IRAN", [32.4279, 53.6880]),
        ("IRAQ", [33.2232, 43.6793]),
        ("SAUDI ARABIA", [23.8859, 45.0792]),
        ("UNITED ARAB EMIRATES", [23.4241, 53.8478]),
        ("KUWAIT", [29.3117, 47.4818]),
        ("TURKEY", [38.9637, 35.2433]),
        ("KAZAKSTAN", [48.0196, 66.9237]),
        ("UK", [55.3781, -3.4360]),
        ("FRANCE", [46.6034, 1.8883]),
        ("GERMANY", [51.1657, 10.4515]),
        ("PORTUGAL", [39.3999, -8.2245]),
        ("KENYA", [-0.0236, 37.9062]),
        ("MAURITIUS", [-20.3484, 57.5522]),
        ("NIGERIA", [9.0820, 8.6753]),
        ("UGANDA", [1.3733, 32.2903]),
        ("ZAMBIA", [-13.1339, 27.8493]),
        ("CANADA", [56.1304, -106.3468]),
        ("U.S.A.", [37.0902, -95.7129]),
        ("AUSTRALIA", [-25.2744, 133.7751]),
        ("FIJI", [-17.7134, 178.0650]),
    ])
});

/// Centroid for a canonical name, domestic table first.
pub fn coordinates(name: &str) -> Option<LatLng> {
    DOMESTIC.get(name).or_else(|| INTERNATIONAL.get(name)).copied()
}

/// Quadratic Bezier control point bowing the line away from the chord.
pub fn control_point(start: LatLng, end: LatLng) -> LatLng {
    let mid = [(start[0] + end[0]) / 2.0, (start[1] + end[1]) / 2.0];
    let dist = ((end[0] - start[0]).powi(2) + (end[1] - start[1]).powi(2)).sqrt();
    [mid[0] + dist * 0.2, mid[1] + dist * 0.2]
}

/// Stroke width on a log scale, never thinner than 1.
pub fn line_weight(count: u64) -> f64 {
    if count == 0 {
        return 1.0;
    }
    ((count as f64).log10() * 1.5).max(1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLine {
    pub origin: String,
    pub destination: String,
    pub count: u64,
    pub start: LatLng,
    pub control: LatLng,
    pub end: LatLng,
    pub weight: f64,
}

/// One curve per filtered record; records with an unplaceable end are skipped.
pub fn flow_lines(view: &FlowView<'_>) -> Vec<FlowLine> {
    view.filtered
        .iter()
        .filter_map(|r| {
            let start = coordinates(&r.origin)?;
            let end = coordinates(&r.destination)?;
            Some(FlowLine {
                origin: r.origin.clone(),
                destination: r.destination.clone(),
                count: r.count,
                start,
                control: control_point(start, end),
                end,
                weight: line_weight(r.count),
            })
        })
        .collect()
}
