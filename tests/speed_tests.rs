//! Speed restoration tests

use bevy::math::Vec2;
use traffic_unblock::simulation::speed::{
    lane_max_speed, max_drive_speed, resolve, restored_speed, with_sign_of,
    FALLBACK_LANE_SPEED, FALLBACK_MAX_SPEED, MIN_RESTORED_SPEED,
};
use traffic_unblock::simulation::{CarData, CarLane};

const EPSILON: f32 = 1e-4;

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

fn car(max_speed: f32) -> CarData {
    CarData {
        max_speed,
        turning: Vec2::new(0.5, 0.1),
        acceleration: 3.0,
        braking: 6.0,
    }
}

#[test]
fn test_straight_lane_from_standstill() {
    let lane = CarLane::straight(20.0);
    let car = car(30.0);

    assert_close(lane_max_speed(Some(&lane), Some(&car)), 20.0);
    assert_close(restored_speed(20.0, 0.0), 10.0);
    assert_close(resolve(Some(&lane), Some(&car), 0.0), 10.0);
}

#[test]
fn test_ramp_above_floor() {
    let lane = CarLane::straight(20.0);
    assert_close(resolve(Some(&lane), Some(&car(30.0)), 9.0), 10.9);
}

#[test]
fn test_ramp_clamped_to_lane_max() {
    let lane = CarLane::straight(20.0);
    assert_close(resolve(Some(&lane), Some(&car(30.0)), 18.0), 20.0);
}

#[test]
fn test_vehicle_slower_than_limit() {
    let lane = CarLane::straight(30.0);
    assert_close(lane_max_speed(Some(&lane), Some(&car(12.0))), 12.0);
}

#[test]
fn test_missing_car_data_uses_fallback_vehicle() {
    let lane = CarLane::straight(20.0);
    assert_close(lane_max_speed(Some(&lane), None), 20.0);
    assert_close(resolve(Some(&lane), None, 0.0), 10.0);

    let slow_lane = CarLane::straight(13.9);
    assert_close(lane_max_speed(Some(&slow_lane), None), 13.9);
    assert_close(resolve(Some(&slow_lane), None, 0.0), 6.95);

    let fast_lane = CarLane::straight(30.0);
    assert_close(lane_max_speed(Some(&fast_lane), None), FALLBACK_MAX_SPEED);
}

#[test]
fn test_missing_lane_data_uses_city_speed() {
    assert_close(lane_max_speed(None, Some(&car(30.0))), FALLBACK_LANE_SPEED);
    assert_close(lane_max_speed(None, Some(&car(12.0))), 12.0);
    assert_close(lane_max_speed(None, None), FALLBACK_LANE_SPEED);
}

#[test]
fn test_cornering_formula() {
    let car = car(30.0);

    // 0.5 * 30 / (0.05 * 30 + 0.5 - 0.1) = 15 / 1.9
    assert_close(max_drive_speed(&car, 20.0, 0.05), 15.0 / 1.9);

    let curved = CarLane {
        speed_limit: 20.0,
        curviness: 0.05,
    };
    assert_close(lane_max_speed(Some(&curved), Some(&car)), 15.0 / 1.9);

    // Below the straightness threshold the limit applies unchanged
    assert_close(max_drive_speed(&car, 20.0, 0.0005), 20.0);

    // Gentle bend where cornering allows more than the limit
    assert_close(max_drive_speed(&car, 5.0, 0.01), 5.0);
}

#[test]
fn test_cornering_speed_floor() {
    let clumsy = CarData {
        max_speed: 30.0,
        turning: Vec2::new(0.01, 0.0),
        acceleration: 3.0,
        braking: 6.0,
    };
    assert_close(max_drive_speed(&clumsy, 20.0, 1.0), 1.0);
}

#[test]
fn test_cornering_degenerate_denominator() {
    let agile = CarData {
        max_speed: 30.0,
        turning: Vec2::new(0.1, 5.0),
        acceleration: 3.0,
        braking: 6.0,
    };
    // Denominator goes negative and is clamped, so the lane limit decides
    assert_close(max_drive_speed(&agile, 20.0, 0.01), 20.0);
}

#[test]
fn test_repeated_ticks_converge_on_lane_max() {
    let lane_max = 20.0;
    let expected = [10.0, 12.0, 14.2, 16.62, 19.282, 20.0, 20.0];

    let mut speed = 0.0;
    for step in expected {
        let next = restored_speed(lane_max, speed);
        assert_close(next, step);
        if speed < lane_max {
            assert!(next > speed, "speed must grow while below the lane max");
        }
        assert!(next <= lane_max, "speed must never overshoot");
        speed = next;
    }
    assert_eq!(speed, lane_max);
}

#[test]
fn test_restored_speed_bounds() {
    for lane_max in [0.0, 2.0, 5.0, 8.0, 15.0, 20.0, 33.0] {
        let floor = MIN_RESTORED_SPEED.max(lane_max * 0.5).min(lane_max);
        for step in 0..50 {
            let current = step as f32;
            let restored = restored_speed(lane_max, current);
            assert!(restored <= lane_max, "{restored} above lane max {lane_max}");
            assert!(restored >= floor, "{restored} below floor {floor}");
        }
    }
}

#[test]
fn test_degenerate_lane_keeps_ceiling() {
    let closed = CarLane::straight(0.0);
    assert_close(lane_max_speed(Some(&closed), Some(&car(30.0))), 0.0);
    assert_close(resolve(Some(&closed), Some(&car(30.0)), 0.0), 0.0);

    // Floor of 5 m/s would exceed a 3 m/s lane; the lane wins
    assert_close(restored_speed(3.0, 0.0), 3.0);
}

#[test]
fn test_sign_is_preserved() {
    assert_close(with_sign_of(10.0, -3.0), -10.0);
    assert_close(with_sign_of(10.0, 3.0), 10.0);
    assert_close(with_sign_of(10.0, 0.0), 10.0);
    assert_close(with_sign_of(10.0, -0.0), 10.0);

    for original in [-25.0f32, -1.0, -0.001] {
        let restored = with_sign_of(resolve(None, Some(&car(30.0)), original.abs()), original);
        assert!(restored < 0.0, "reversing vehicle flipped direction");
    }
}
