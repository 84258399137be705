use crate::{error::Result, types::AreaRecord};

use std::{fs, path::Path};

use tracing::{Level, event};

/// National parks and biosphere reserves of Vietnam, with approximate
/// centroids and areas in km².
pub fn sample_protected_areas() -> Vec<AreaRecord> {
    vec![
        AreaRecord::new("VQG Ba Bể", 22.25, 105.62, 100.0),
        AreaRecord::new("VQG Cát Tiên", 11.45, 107.43, 720.0),
        AreaRecord::new("VQG Phong Nha-Kẻ Bàng", 17.60, 106.28, 857.0),
        AreaRecord::new("VQG Cúc Phương", 20.30, 105.67, 222.0),
        AreaRecord::new("VQG Tam Đảo", 21.48, 105.63, 368.0),
        AreaRecord::new("VQG Ba Vì", 21.07, 105.37, 108.0),
        AreaRecord::new("VQG Xuân Sơn", 21.12, 104.95, 155.0),
        AreaRecord::new("VQG Hoàng Liên", 22.37, 103.78, 298.0),
        AreaRecord::new("VQG Yok Đôn", 12.92, 107.75, 1156.0),
        AreaRecord::new("VQG Bidoup - Núi Bà", 12.18, 108.68, 650.0),
        AreaRecord::new("VQG Côn Đảo", 8.68, 106.60, 76.0),
        AreaRecord::new("VQG Phú Quốc", 10.22, 104.00, 314.0),
        AreaRecord::new("VQG Tràm Chim", 10.75, 105.52, 75.0),
        AreaRecord::new("VQG U Minh Thượng", 9.58, 105.07, 82.0),
        AreaRecord::new("VQG Mũi Cà Mau", 8.60, 104.78, 410.0),
        AreaRecord::new("KDTSQ Cần Giờ", 10.40, 106.93, 757.0),
        AreaRecord::new("VQG Bạch Mã", 16.20, 107.85, 220.0),
        AreaRecord::new("VQG Núi Chúa", 11.70, 109.15, 295.0),
        AreaRecord::new("VQG Chư Yang Sin", 14.42, 108.37, 589.0),
        AreaRecord::new("VQG Xuân Thủy", 20.22, 106.55, 71.0),
        AreaRecord::new("VQG Vũ Quang", 18.33, 105.37, 552.0),
        AreaRecord::new("VQG Bến En", 19.58, 105.48, 166.0),
        AreaRecord::new("VQG Pù Mát", 18.97, 105.08, 912.0),
        AreaRecord::new("VQG Bù Gia Mập", 11.83, 107.20, 260.0),
        AreaRecord::new("VQG Lò Gò - Xa Mát", 11.52, 106.48, 185.0),
    ]
}

/// Reads protected areas from a JSON array of
/// `{"name", "area_km2", "lat", "lon"}` objects.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<AreaRecord>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;

    let records: Vec<AreaRecord> = serde_json::from_str(&raw)?;

    event!(
        Level::INFO,
        "Loaded {} protected areas from {}",
        records.len(),
        path.display()
    );

    Ok(records)
}
