use alloy_sol_types::sol;

sol! {
    interface IConditionalTokens {
        function splitPosition(
            address collateralToken,
            bytes32 parentCollectionId,
            bytes32 conditionId,
            uint256[] partition,
            uint256 amount
        ) external;

        function mergePositions(
            address collateralToken,
            bytes32 parentCollectionId,
            bytes32 conditionId,
            uint256[] partition,
            uint256 amount
        ) external;

        function redeemPositions(
            address collateralToken,
            bytes32 parentCollectionId,
            bytes32 conditionId,
            uint256[] indexSets
        ) external;

        function setApprovalForAll(address operator, bool approved) external;
    }

    interface INegRiskAdapter {
        function redeemPositions(bytes32 conditionId, uint256[] amounts) external;

        function convertPositions(bytes32 marketId, uint256 indexSet, uint256 amount) external;
    }

    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);

        function transfer(address to, uint256 amount) external returns (bool);
    }

    /// `typeCode` 1 is a plain call
    struct ProxyCall {
        uint8 typeCode;
        address to;
        uint256 value;
        bytes data;
    }

    interface IProxyWalletFactory {
        function proxy(ProxyCall[] calls) external payable returns (bytes[] returnValues);
    }

    interface ISafe {
        function execTransaction(
            address to,
            uint256 value,
            bytes data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            bytes signatures
        ) external payable returns (bool success);
    }

    struct CreateSig {
        uint8 v;
        bytes32 r;
        bytes32 s;
    }

    interface ISafeProxyFactory {
        function createProxy(
            address paymentToken,
            uint256 payment,
            address paymentReceiver,
            CreateSig createSig
        ) external;
    }
}
