use super::distance_wgs84;

#[test]
fn one_ten_thousandth_degree_of_latitude_is_about_eleven_meters() {
    let (horizontal, vertical) = distance_wgs84(45.0, -75.0, 100.0, 45.0001, -75.0, 100.0);
    assert!((horizontal - 11.1).abs() < 0.1, "got {horizontal}");
    assert!(vertical.abs() < f32::EPSILON);
}

#[test]
fn distance_is_symmetric() {
    let a = (45.123, -75.456, 120.0_f32);
    let b = (45.124, -75.455, 150.0_f32);
    let (h_ab, v_ab) = distance_wgs84(a.0, a.1, a.2, b.0, b.1, b.2);
    let (h_ba, v_ba) = distance_wgs84(b.0, b.1, b.2, a.0, a.1, a.2);
    assert!((h_ab - h_ba).abs() < 1e-6);
    assert!((v_ab + v_ba).abs() < 1e-6);
}

#[test]
fn vertical_separation_is_signed() {
    let (_, vertical) = distance_wgs84(45.0, -75.0, 100.0, 45.0, -75.0, 130.0);
    assert!((vertical - 30.0).abs() < f32::EPSILON);
}

#[test]
fn longitude_distance_shrinks_with_latitude() {
    let (at_equator, _) = distance_wgs84(0.0, 10.0, 0.0, 0.0, 10.001, 0.0);
    let (at_sixty, _) = distance_wgs84(60.0, 10.0, 0.0, 60.0, 10.001, 0.0);
    assert!(at_sixty < at_equator * 0.6);
}
