//! Threshold-based alerting on cost estimates
//!
//! A pure evaluation: no state, no side effects. An empty result means
//! every watched metric is within its threshold and the caller should
//! present a neutral status.

use rust_decimal::Decimal;
use serde::Deserialize;

use types::estimate::CostEstimate;

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

/// An alert triggered by a threshold breach.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub level: AlertLevel,
    pub metric: String,
    pub message: String,
}

/// Configurable alert thresholds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Absolute slippage above which to alert.
    pub slippage: Decimal,
    /// Absolute market impact above which to alert.
    pub impact: Decimal,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            slippage: Decimal::new(1, 2), // 0.01
            impact: Decimal::new(1, 2),   // 0.01
        }
    }
}

/// Evaluate an estimate against the thresholds.
///
/// The result is ordered: a slippage alert always precedes an impact
/// alert.
pub fn evaluate(estimate: &CostEstimate, thresholds: &AlertThresholds) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if estimate.slippage.abs() > thresholds.slippage {
        alerts.push(Alert {
            level: AlertLevel::Warning,
            metric: "slippage".to_string(),
            message: format!(
                "slippage {} exceeds threshold {}",
                estimate.slippage, thresholds.slippage
            ),
        });
    }

    if estimate.market_impact.abs() > thresholds.impact {
        alerts.push(Alert {
            level: AlertLevel::Warning,
            metric: "market_impact".to_string(),
            message: format!(
                "market impact {} exceeds threshold {}",
                estimate.market_impact, thresholds.impact
            ),
        });
    }

    alerts
}
