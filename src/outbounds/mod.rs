/// +----------------------------------------------------------+
/// | MODULES                                                  |
/// +----------+-------+-------+------------------------------+
/// | Exports:                                                 |
/// |   - rabbit_gateway                                       |
/// |   - rabbit_source                                        |
/// +----------------------------------------------------------+

/// `EventGateway` publishing to the RabbitMQ topic exchange.
pub mod rabbit_gateway;

/// `EventSource` consuming from a RabbitMQ subscription.
pub mod rabbit_source;
